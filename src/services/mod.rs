pub mod booking_form;
pub mod notifier;
pub mod pricing;
pub mod sessions;
pub mod validation;
