use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub slot_id: String,
    pub slot_number: u32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: f64,
    pub total_price: f64,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Form,
    Confirmation,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Form => "form",
            ViewMode::Confirmation => "confirmation",
        }
    }
}
