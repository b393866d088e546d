//! Route definitions for the booking assistant.
//!
//! Mounted at `/assistant` by `api_routes()`.
//!
//! ```text
//! POST   /        generate_response
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::assistant;
use crate::state::AppState;

/// Assistant routes -- mounted at `/assistant`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(assistant::generate_response))
}
