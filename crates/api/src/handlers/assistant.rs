//! Handler for the booking assistant endpoint.
//!
//! The assistant is decorative: this endpoint never influences booking
//! flow and always answers 200 with a usable string once the touchpoint
//! is recognized. Generation trouble is absorbed by the service layer.

use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use cadenza_core::assistant::{AssistantRequest, Touchpoint};

use crate::error::{AppError, AppResult};
use crate::middleware::ClientId;
use crate::state::AppState;

/// Assistant calls per window per caller.
const ASSISTANT_LIMIT: u32 = 20;
const ASSISTANT_WINDOW: Duration = Duration::from_secs(60);

/// Request body for `POST /assistant`.
///
/// The touchpoint arrives as a plain string so an unknown tag becomes a
/// descriptive 400 instead of a serde rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantParams {
    pub touchpoint: Option<String>,
    pub phase: Option<i32>,
    pub question: Option<i32>,
    pub user_answer: Option<String>,
    pub booking_data: Option<serde_json::Value>,
    pub user_name: Option<String>,
}

/// Response payload for `POST /assistant`.
#[derive(Debug, Serialize)]
pub struct AssistantResponseBody {
    pub response: String,
}

/// POST /assistant -- generate a touchpoint response.
pub async fn generate_response(
    State(state): State<AppState>,
    ClientId(caller): ClientId,
    Json(params): Json<AssistantParams>,
) -> AppResult<impl IntoResponse> {
    if !state
        .rate_limiter
        .check(
            &format!("assistant:{caller}"),
            ASSISTANT_LIMIT,
            ASSISTANT_WINDOW,
        )
        .allowed
    {
        return Err(AppError::RateLimited);
    }

    let touchpoint = Touchpoint::from_tag(params.touchpoint.as_deref().unwrap_or_default())
        .map_err(AppError::Core)?;

    let request = AssistantRequest {
        touchpoint,
        phase: params.phase.unwrap_or(0),
        question: params.question,
        user_answer: params.user_answer,
        booking_data: params.booking_data,
        user_name: params.user_name,
    };

    let response = state.assistant.generate(&request).await;

    Ok(Json(AssistantResponseBody { response }))
}
