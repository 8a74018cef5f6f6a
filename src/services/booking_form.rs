use std::sync::Arc;

use serde::Serialize;

use crate::models::{Booking, ParkingSlot, SlotCatalog, ViewMode};
use crate::services::notifier::ConfirmationNotifier;
use crate::services::pricing::{self, BookingSummary};
use crate::services::validation;

#[derive(Debug, PartialEq)]
pub enum SubmitError {
    MissingFields,
    InvalidEmail,
    InvalidDate(String),
    InvalidTime(String),
    EndBeforeStart,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::MissingFields => write!(f, "Please fill in all fields"),
            SubmitError::InvalidEmail => write!(f, "Please enter a valid email address"),
            SubmitError::InvalidDate(date) => {
                write!(f, "Please enter a valid booking date (got {date})")
            }
            SubmitError::InvalidTime(time) => {
                write!(f, "Please enter a valid time (got {time})")
            }
            SubmitError::EndBeforeStart => write!(f, "End time must be after start time"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("there is no pending booking to confirm")]
    NotConfirming,

    #[error("confirmation could not be sent: {0}")]
    Notify(String),
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FormFields {
    pub selected_slot: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub mode: ViewMode,
    #[serde(flatten)]
    pub fields: FormFields,
    pub selected_slot_label: Option<String>,
    pub summary: Option<BookingSummary>,
    pub can_submit: bool,
    pub pending: Option<Booking>,
}

pub struct BookingForm {
    catalog: Arc<SlotCatalog>,
    fields: FormFields,
    mode: ViewMode,
    pending: Option<Booking>,
}

impl BookingForm {
    pub fn new(catalog: Arc<SlotCatalog>) -> Self {
        Self {
            catalog,
            fields: FormFields::default(),
            mode: ViewMode::Form,
            pending: None,
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn pending(&self) -> Option<&Booking> {
        self.pending.as_ref()
    }

    pub fn selected_slot(&self) -> Option<&ParkingSlot> {
        self.fields
            .selected_slot
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn select_slot(&mut self, id: &str) -> bool {
        if self.mode != ViewMode::Form {
            return false;
        }
        match self.catalog.get(id) {
            Some(slot) if slot.is_available => {
                let changed = self.fields.selected_slot.as_deref() != Some(id);
                self.fields.selected_slot = Some(slot.id.clone());
                changed
            }
            Some(_) => {
                tracing::debug!(slot = id, "ignoring selection of occupied slot");
                false
            }
            None => {
                tracing::debug!(slot = id, "ignoring selection of unknown slot");
                false
            }
        }
    }

    pub fn set_date(&mut self, value: impl Into<String>) {
        if self.mode == ViewMode::Form {
            self.fields.date = value.into();
        }
    }

    pub fn set_start_time(&mut self, value: impl Into<String>) {
        if self.mode == ViewMode::Form {
            self.fields.start_time = value.into();
        }
    }

    pub fn set_end_time(&mut self, value: impl Into<String>) {
        if self.mode == ViewMode::Form {
            self.fields.end_time = value.into();
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        if self.mode == ViewMode::Form {
            self.fields.email = value.into();
        }
    }

    fn all_present(&self) -> bool {
        let f = &self.fields;
        f.selected_slot.is_some()
            && !f.date.is_empty()
            && !f.start_time.is_empty()
            && !f.end_time.is_empty()
            && !f.email.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.all_present() && validation::is_valid_email(&self.fields.email)
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        if !self.can_submit() {
            return None;
        }
        let slot = self.selected_slot()?;
        pricing::summarize(&self.fields.start_time, &self.fields.end_time, slot.price).ok()
    }

    pub fn submit(&mut self) -> Result<Booking, SubmitError> {
        if self.mode == ViewMode::Confirmation {
            if let Some(booking) = &self.pending {
                return Ok(booking.clone());
            }
        }

        let booking = self.build_booking()?;
        tracing::debug!(
            slot = %booking.slot_id,
            duration = booking.duration,
            total = booking.total_price,
            "booking ready for confirmation"
        );
        self.mode = ViewMode::Confirmation;
        self.pending = Some(booking.clone());
        Ok(booking)
    }

    fn build_booking(&self) -> Result<Booking, SubmitError> {
        if !self.all_present() {
            return Err(SubmitError::MissingFields);
        }
        let f = &self.fields;
        if !validation::is_valid_email(&f.email) {
            return Err(SubmitError::InvalidEmail);
        }
        let slot = self.selected_slot().ok_or(SubmitError::MissingFields)?;
        if validation::parse_booking_date(&f.date).is_none() {
            return Err(SubmitError::InvalidDate(f.date.clone()));
        }

        let duration = pricing::compute_duration(&f.start_time, &f.end_time)
            .map_err(|e| SubmitError::InvalidTime(e.0))?;
        if duration <= 0.0 {
            return Err(SubmitError::EndBeforeStart);
        }

        Ok(Booking {
            slot_id: slot.id.clone(),
            slot_number: slot.number,
            date: f.date.clone(),
            start_time: f.start_time.clone(),
            end_time: f.end_time.clone(),
            duration,
            total_price: pricing::total_price(duration, slot.price),
            email: f.email.clone(),
        })
    }

    // A failing notifier leaves the booking pending.
    pub fn confirm(&mut self, notifier: &dyn ConfirmationNotifier) -> Result<String, FormError> {
        let booking = match (self.mode, self.pending.as_ref()) {
            (ViewMode::Confirmation, Some(booking)) => booking,
            _ => return Err(FormError::NotConfirming),
        };

        let notice = notifier
            .notify(booking)
            .map_err(|e| FormError::Notify(e.to_string()))?;

        self.reset();
        Ok(notice)
    }

    pub fn go_back(&mut self) {
        self.mode = ViewMode::Form;
        self.pending = None;
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.mode = ViewMode::Form;
        self.pending = None;
    }

    pub fn view(&self) -> FormView {
        FormView {
            mode: self.mode,
            fields: self.fields.clone(),
            selected_slot_label: self.selected_slot().map(|s| format!("Slot #{}", s.number)),
            summary: self.summary(),
            can_submit: self.mode == ViewMode::Form && self.can_submit(),
            pending: self.pending.clone(),
        }
    }
}
