use crate::models::Booking;

pub trait ConfirmationNotifier: Send + Sync {
    fn notify(&self, booking: &Booking) -> anyhow::Result<String>;
}

pub fn confirmation_notice(booking: &Booking) -> String {
    format!(
        "Booking confirmed! A confirmation email has been sent to {}",
        booking.email
    )
}

pub struct LogNotifier;

impl ConfirmationNotifier for LogNotifier {
    fn notify(&self, booking: &Booking) -> anyhow::Result<String> {
        tracing::info!(
            slot = %booking.slot_id,
            date = %booking.date,
            email = %booking.email,
            total = booking.total_price,
            "booking confirmed"
        );
        Ok(confirmation_notice(booking))
    }
}
