pub mod assistant;
pub mod booking;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bookings          POST submit booking, GET lookup (?email=)
/// /assistant         POST generate touchpoint response
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/bookings", booking::router())
        .nest("/assistant", assistant::router())
}
