//! Route definitions for booking submission and lookup.
//!
//! Mounted at `/bookings` by `api_routes()`.
//!
//! ```text
//! POST   /        submit_booking
//! GET    /        lookup_bookings (?email=)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Booking routes -- mounted at `/bookings`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(booking::lookup_bookings).post(booking::submit_booking),
    )
}
