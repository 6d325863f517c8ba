pub mod bookings;
pub mod health;
pub mod my_bookings;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/dates", get(bookings::get_dates))
        .route("/api/slots", get(bookings::get_slots))
        .route("/api/bookings", get(my_bookings::find_bookings))
        .route("/api/bookings/bowling", post(bookings::book_bowling))
        .route("/api/bookings/ar-darts", post(bookings::book_ar_darts))
        .route("/api/bookings/soft-play", post(bookings::book_soft_play))
        .route("/api/bookings/:id", delete(my_bookings::cancel_booking))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
