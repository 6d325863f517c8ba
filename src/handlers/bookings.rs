use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Activity, SlotAvailability};
use crate::services::scheduling;
use crate::services::wizard::{
    self, ActivityForm, ArDartsForm, BowlingForm, Confirmation, SoftPlayForm, Wizard,
};
use crate::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid date: {s}"))),
    }
}

// GET /api/dates
#[derive(Serialize)]
pub struct DatesResponse {
    dates: Vec<NaiveDate>,
}

pub async fn get_dates() -> Json<DatesResponse> {
    Json(DatesResponse {
        dates: scheduling::booking_window(today()),
    })
}

// GET /api/slots?activity=bowling&date=2025-06-16
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub activity: String,
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    activity: Activity,
    date: NaiveDate,
    slots: Vec<SlotAvailability>,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let activity = Activity::parse(&query.activity)
        .ok_or_else(|| AppError::BadRequest(format!("unknown activity: {}", query.activity)))?;
    let date = parse_date(query.date.as_deref())?.unwrap_or_else(today);

    let slots = {
        let store = state.store();
        scheduling::slots_for_activity(store.bookings(), date, activity, wizard::slot_hours(activity))
    };

    Ok(Json(SlotsResponse {
        activity,
        date,
        slots,
    }))
}

// POST /api/bookings/{bowling,ar-darts,soft-play}
#[derive(Deserialize)]
pub struct BookingRequest<F> {
    #[serde(flatten)]
    pub form: F,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub email: String,
}

fn submit<F: ActivityForm>(
    state: &AppState,
    req: BookingRequest<F>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let date = parse_date(req.date.as_deref())?;
    let wizard = Wizard::new(req.form, today());

    let confirmation = {
        let mut store = state.store();
        wizard.complete(&mut store, date, req.time, &req.email)
    };

    match confirmation {
        Ok(confirmation) => Ok((StatusCode::CREATED, Json(confirmation))),
        Err(e) => {
            tracing::info!(activity = %F::ACTIVITY, error = %e, "booking rejected");
            Err(e.into())
        }
    }
}

pub async fn book_bowling(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest<BowlingForm>>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    submit(&state, req)
}

pub async fn book_ar_darts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest<ArDartsForm>>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    submit(&state, req)
}

pub async fn book_soft_play(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest<SoftPlayForm>>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    submit(&state, req)
}
