pub mod form;
pub mod health;
pub mod page;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(page::booking_page))
        .route("/api/slots", get(form::get_slots))
        .route("/api/form", get(form::get_form))
        .route("/api/form/slot", post(form::select_slot))
        .route("/api/form/fields", post(form::update_fields))
        .route("/api/form/submit", post(form::submit))
        .route("/api/form/confirm", post(form::confirm))
        .route("/api/form/back", post(form::go_back))
        .with_state(state)
}
