//! Assistant touchpoints, request payload, fallback strings, and input
//! hardening.
//!
//! The assistant decorates the booking flow with short natural-language
//! responses; it never decides which question comes next and never
//! validates answers. The generation call itself lives in the
//! `cadenza-assistant` crate; everything here is pure and synchronous so
//! the flow keeps working when generation is unavailable.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::sanitize::{strip_control_chars, truncate_chars};

// ---------------------------------------------------------------------------
// Touchpoints
// ---------------------------------------------------------------------------

/// The closed set of points in the booking flow where the assistant is
/// invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Touchpoint {
    OtherFollowup,
    SongResponse,
    SpecialRequirements,
    PhaseTransition,
    ReviewSummary,
    ErrorRecovery,
}

/// All touchpoints, for iteration in tests and fallback tables.
pub const ALL_TOUCHPOINTS: [Touchpoint; 6] = [
    Touchpoint::OtherFollowup,
    Touchpoint::SongResponse,
    Touchpoint::SpecialRequirements,
    Touchpoint::PhaseTransition,
    Touchpoint::ReviewSummary,
    Touchpoint::ErrorRecovery,
];

impl Touchpoint {
    /// Parse a touchpoint tag from the wire. Unknown tags are a
    /// validation error; the endpoint rejects them.
    pub fn from_tag(s: &str) -> Result<Self, CoreError> {
        match s {
            "other_followup" => Ok(Self::OtherFollowup),
            "song_response" => Ok(Self::SongResponse),
            "special_requirements" => Ok(Self::SpecialRequirements),
            "phase_transition" => Ok(Self::PhaseTransition),
            "review_summary" => Ok(Self::ReviewSummary),
            "error_recovery" => Ok(Self::ErrorRecovery),
            _ => Err(CoreError::Validation(format!(
                "Invalid touchpoint '{s}'. Must be one of: other_followup, song_response, \
                 special_requirements, phase_transition, review_summary, error_recovery"
            ))),
        }
    }

    /// The wire tag for this touchpoint.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::OtherFollowup => "other_followup",
            Self::SongResponse => "song_response",
            Self::SpecialRequirements => "special_requirements",
            Self::PhaseTransition => "phase_transition",
            Self::ReviewSummary => "review_summary",
            Self::ErrorRecovery => "error_recovery",
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One assistant invocation. Constructed per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub touchpoint: Touchpoint,
    pub phase: i32,
    pub question: Option<i32>,
    pub user_answer: Option<String>,
    pub booking_data: Option<serde_json::Value>,
    pub user_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Input hardening
// ---------------------------------------------------------------------------

/// Maximum characters of end-user answer text forwarded to generation.
pub const USER_ANSWER_MAX_CHARS: usize = 1000;

/// Maximum characters of end-user name text forwarded to generation.
pub const USER_NAME_MAX_CHARS: usize = 50;

/// Harden end-user text before prompt interpolation: strip control
/// characters, trim, and cap the length.
pub fn harden_user_text(raw: &str, max_chars: usize) -> String {
    truncate_chars(strip_control_chars(raw).trim(), max_chars)
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

/// The static response used when generation fails or is unconfigured.
///
/// Callers always receive a usable string; generation trouble is a
/// logging concern, never a caller-visible error.
pub fn fallback_response(touchpoint: Touchpoint) -> &'static str {
    match touchpoint {
        Touchpoint::OtherFollowup => {
            "That sounds like a wonderful occasion. Let's capture the rest of the details."
        }
        Touchpoint::SongResponse => {
            "Great choices. I'll make sure these requests are part of the plan."
        }
        Touchpoint::SpecialRequirements => {
            "Noted. We'll keep these requirements in mind when preparing for your event."
        }
        Touchpoint::PhaseTransition => {
            "Thanks! Let's move on to the next part of your booking."
        }
        Touchpoint::ReviewSummary => {
            "Here is a summary of your booking details. Please review everything before submitting."
        }
        Touchpoint::ErrorRecovery => {
            "Sorry, something went wrong on our end. Your answers are safe, please try again."
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
