use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::booking_form::{BookingForm, FormView};
use crate::services::pricing::format_price;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "parking_session";

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

// Runs `action` against the caller's own form and sets the session cookie
// when a new session was opened.
fn with_form<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    action: impl FnOnce(&mut BookingForm) -> Result<T, AppError>,
) -> Response {
    let mut sessions = match state.sessions.lock() {
        Ok(sessions) => sessions,
        Err(_) => {
            return AppError::Internal("session store lock poisoned".to_string()).into_response()
        }
    };

    let cookie = session_cookie(headers);
    let (session, form) = sessions.open(cookie.as_deref(), chrono::Utc::now());

    let mut res = match action(form) {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    };

    if session.is_new {
        tracing::debug!(session = %session.id, "opened booking session");
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            session.id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            res.headers_mut().insert(SET_COOKIE, value);
        }
    }
    res
}

#[derive(Serialize)]
pub struct FormResponse {
    #[serde(flatten)]
    view: FormView,
    min_date: String,
    currency: String,
}

fn form_response(state: &AppState, form: &BookingForm) -> FormResponse {
    FormResponse {
        view: form.view(),
        min_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        currency: state.config.currency.clone(),
    }
}

// GET /api/slots
#[derive(Serialize)]
pub struct SlotResponse {
    id: String,
    number: u32,
    is_available: bool,
    price: f64,
    price_label: String,
    selected: bool,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    currency: String,
    price_tiers: Vec<f64>,
    slots: Vec<SlotResponse>,
}

pub async fn get_slots(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    with_form(&state, &headers, |form| {
        let selected = form.fields().selected_slot.as_deref();
        let currency = &state.config.currency;

        let slots = state
            .catalog
            .slots()
            .iter()
            .map(|s| SlotResponse {
                id: s.id.clone(),
                number: s.number,
                is_available: s.is_available,
                price: s.price,
                price_label: format!("{}/hr", format_price(currency, s.price)),
                selected: selected == Some(s.id.as_str()),
            })
            .collect();

        Ok(SlotsResponse {
            currency: currency.clone(),
            price_tiers: state.catalog.price_tiers(),
            slots,
        })
    })
}

// GET /api/form
pub async fn get_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    with_form(&state, &headers, |form| Ok(form_response(&state, form)))
}

// POST /api/form/slot
#[derive(Deserialize)]
pub struct SelectSlot {
    pub slot_id: String,
}

pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SelectSlot>,
) -> Response {
    with_form(&state, &headers, |form| {
        if form.select_slot(payload.slot_id.trim()) {
            tracing::debug!(slot = %payload.slot_id, "slot selected");
        }
        Ok(form_response(&state, form))
    })
}

// POST /api/form/fields
#[derive(Deserialize)]
pub struct FieldsUpdate {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub email: Option<String>,
}

pub async fn update_fields(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<FieldsUpdate>,
) -> Response {
    with_form(&state, &headers, |form| {
        if let Some(date) = payload.date {
            form.set_date(date);
        }
        if let Some(start) = payload.start_time {
            form.set_start_time(start);
        }
        if let Some(end) = payload.end_time {
            form.set_end_time(end);
        }
        if let Some(email) = payload.email {
            form.set_email(email);
        }
        Ok(form_response(&state, form))
    })
}

// POST /api/form/submit
pub async fn submit(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    with_form(&state, &headers, |form| {
        if let Err(e) = form.submit() {
            tracing::debug!(error = %e, "booking submit rejected");
            return Err(e.into());
        }
        Ok(form_response(&state, form))
    })
}

// POST /api/form/confirm
#[derive(Serialize)]
pub struct ConfirmResponse {
    notice: String,
    view: FormResponse,
}

pub async fn confirm(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    with_form(&state, &headers, |form| {
        let notice = form.confirm(state.notifier.as_ref()).map_err(|e| {
            tracing::warn!(error = %e, "booking confirmation failed");
            AppError::from(e)
        })?;
        Ok(ConfirmResponse {
            notice,
            view: form_response(&state, form),
        })
    })
}

// POST /api/form/back
pub async fn go_back(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    with_form(&state, &headers, |form| {
        tracing::debug!(mode = form.mode().as_str(), "leaving confirmation view");
        form.go_back();
        Ok(form_response(&state, form))
    })
}
