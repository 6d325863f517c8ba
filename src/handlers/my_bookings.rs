use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::lookup::Lookup;
use crate::state::AppState;

// GET /api/bookings?email=
#[derive(Deserialize)]
pub struct LookupQuery {
    pub email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(flatten)]
    booking: Booking,
    activity_name: &'static str,
    guest_summary: String,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self {
            activity_name: booking.activity.display_name(),
            guest_summary: booking.guests.summary(),
            booking,
        }
    }
}

#[derive(Serialize)]
pub struct LookupResponse {
    email: String,
    count: usize,
    summary: String,
    bookings: Vec<BookingView>,
}

pub async fn find_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<LookupResponse>, AppError> {
    let mut lookup = Lookup::new();
    {
        let store = state.store();
        lookup
            .search(&store, query.email.as_deref().unwrap_or_default())
            .map_err(|errors| AppError::Validation { step: None, errors })?;
    }

    Ok(Json(LookupResponse {
        email: lookup.email().to_string(),
        count: lookup.results().len(),
        summary: lookup.summary(),
        bookings: lookup.results().iter().cloned().map(BookingView::from).collect(),
    }))
}

// DELETE /api/bookings/:id
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let removed = state.store().cancel_booking(&id);
    Json(serde_json::json!({ "ok": true, "removed": removed }))
}
