pub mod booking;
pub mod slot;

pub use booking::{Booking, ViewMode};
pub use slot::{ParkingSlot, SlotCatalog};
