//! Handlers for booking submission and lookup.
//!
//! The submission pipeline runs its steps strictly in order, each failure
//! short-circuiting the rest: rate limit, batched required fields, music
//! styles, email, phone, event date, then reference generation, sentinel
//! resolution, sanitization, persistence, and finally fire-and-forget
//! notification dispatch. The booking row is the source of truth; nothing
//! after a successful insert can fail the submission.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use cadenza_core::booking::{
    resolve_duration, resolve_event_type, BookingStatus, BookingSubmission,
};
use cadenza_core::error::CoreError;
use cadenza_core::reference::generate_reference;
use cadenza_core::sanitize::{clean_long_text, clean_short_text};
use cadenza_core::types::Timestamp;
use cadenza_core::validate;
use cadenza_db::models::booking::{Booking, NewBooking};
use cadenza_db::models::booking_message::BookingMessage;
use cadenza_db::repositories::{booking_repo, BookingMessageRepo, BookingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::ClientId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rate-limit budgets
// ---------------------------------------------------------------------------

/// Submissions per window per caller.
const SUBMIT_LIMIT: u32 = 5;
const SUBMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Lookups per window per caller (read-only, more generous).
const LOOKUP_LIMIT: u32 = 30;
const LOOKUP_WINDOW: Duration = Duration::from_secs(60);

/// Insert attempts when the generated reference collides.
const REFERENCE_RETRY_ATTEMPTS: u32 = 3;

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Success payload for `POST /bookings`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: i64,
    pub reference: String,
    pub submitted_at: Timestamp,
}

/// One booking plus its message thread, as returned by lookup.
#[derive(Debug, Serialize)]
pub struct BookingWithMessages {
    #[serde(flatten)]
    pub booking: Booking,
    pub messages: Vec<BookingMessage>,
}

/// Payload for `GET /bookings`.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub bookings: Vec<BookingWithMessages>,
}

/// Query parameters for lookup.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /bookings
// ---------------------------------------------------------------------------

/// Submit a booking request.
pub async fn submit_booking(
    State(state): State<AppState>,
    ClientId(caller): ClientId,
    Json(submission): Json<BookingSubmission>,
) -> AppResult<impl IntoResponse> {
    // 1. Rate limit before any validation or side effect. The key is
    // endpoint-scoped so each endpoint's budget counts independently.
    if !state
        .rate_limiter
        .check(&format!("submit:{caller}"), SUBMIT_LIMIT, SUBMIT_WINDOW)
        .allowed
    {
        return Err(AppError::RateLimited);
    }

    // 2. Required fields, reported together.
    let missing = validate::missing_required_fields(&submission);
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))));
    }

    // 3. At least one music style.
    if !validate::has_music_styles(&submission) {
        return Err(AppError::Core(CoreError::Validation(
            "Please select at least one music style".to_string(),
        )));
    }

    // 4. Email shape, normalized for storage.
    let contact_email = validate::normalize_email(submission.email.as_deref().unwrap_or_default())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Please provide a valid email address".to_string(),
            ))
        })?;

    // 5. Phone digit count.
    let phone_raw = submission.phone.as_deref().unwrap_or_default();
    if !validate::valid_phone(phone_raw) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Phone number must contain {} to {} digits",
            validate::PHONE_MIN_DIGITS,
            validate::PHONE_MAX_DIGITS
        ))));
    }

    // 6. Event date: parseable and strictly after tomorrow at midnight.
    let date_raw = submission.event_date.as_deref().unwrap_or_default();
    let event_datetime = validate::parse_event_datetime(date_raw).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Please provide a valid event date".to_string(),
        ))
    })?;
    if !validate::event_date_is_bookable(event_datetime, Utc::now()) {
        return Err(AppError::Core(CoreError::Validation(
            "Event date must be at least two days from today".to_string(),
        )));
    }

    // 7.-9. Reference, sentinel resolution, sanitization. The reference is
    // regenerated inside the retry loop; everything else is fixed here.
    let new_booking = NewBooking {
        reference: generate_reference(),
        status: BookingStatus::Pending.as_str(),
        event_type: clean_short_text(&resolve_event_type(&submission)),
        event_date: event_datetime.date_naive(),
        time_preference: clean_short_text(
            submission.time_preference.as_deref().unwrap_or_default(),
        ),
        venue: submission.venue.as_deref().map(clean_short_text),
        guest_count: submission.guest_count.as_deref().map(clean_short_text),
        setting: submission.setting.as_deref().map(clean_short_text),
        duration: clean_short_text(&resolve_duration(&submission)),
        music_styles: submission
            .music_styles
            .iter()
            .filter(|style| !style.trim().is_empty())
            .map(|style| clean_short_text(style))
            .collect(),
        song_requests: submission.song_requests.as_deref().map(clean_long_text),
        special_requirements: submission
            .special_requirements
            .as_deref()
            .map(clean_long_text),
        contact_name: clean_short_text(submission.name.as_deref().unwrap_or_default()),
        contact_email,
        contact_phone: clean_short_text(phone_raw),
        referral_source: submission.referral_source.as_deref().map(clean_short_text),
    };

    // 10. Persist. A reference collision regenerates and retries; any
    // other failure is a persistence error, reported generically.
    let booking = insert_with_reference_retry(&state.pool, new_booking)
        .await
        .map_err(|e| {
            if state.config.is_development() {
                tracing::error!(error = %e, "Failed to persist booking");
            } else {
                tracing::error!("Failed to persist booking");
            }
            AppError::Persistence
        })?;

    // 11. Notifications are dispatched only after the row exists, and
    // their outcome never reaches the caller.
    state.notifier.dispatch_booking_notifications(&booking);

    tracing::info!(
        booking_id = booking.id,
        reference = %booking.reference,
        event_type = %booking.event_type,
        "Booking submitted"
    );

    // 12. Success payload.
    Ok((
        StatusCode::CREATED,
        Json(SubmitBookingResponse {
            success: true,
            message: format!(
                "Thank you! Your booking request has been received. Your reference is {}.",
                booking.reference
            ),
            booking_id: booking.id,
            reference: booking.reference.clone(),
            submitted_at: booking.created_at,
        }),
    ))
}

/// Insert a booking, regenerating the reference on a unique-constraint
/// collision, up to [`REFERENCE_RETRY_ATTEMPTS`] attempts total.
async fn insert_with_reference_retry(
    pool: &cadenza_db::DbPool,
    mut booking: NewBooking,
) -> Result<Booking, sqlx::Error> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match BookingRepo::insert(pool, &booking).await {
            Ok(row) => return Ok(row),
            Err(e) if booking_repo::is_reference_conflict(&e) && attempt < REFERENCE_RETRY_ATTEMPTS => {
                tracing::warn!(
                    attempt,
                    reference = %booking.reference,
                    "Booking reference collision; regenerating"
                );
                booking.reference = generate_reference();
            }
            Err(e) => return Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /bookings
// ---------------------------------------------------------------------------

/// Look up bookings by contact email, newest first, each with its message
/// thread.
pub async fn lookup_bookings(
    State(state): State<AppState>,
    ClientId(caller): ClientId,
    Query(params): Query<LookupParams>,
) -> AppResult<impl IntoResponse> {
    if !state
        .rate_limiter
        .check(&format!("lookup:{caller}"), LOOKUP_LIMIT, LOOKUP_WINDOW)
        .allowed
    {
        return Err(AppError::RateLimited);
    }

    let email = validate::normalize_email(params.email.as_deref().unwrap_or_default())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Please provide a valid email address".to_string(),
            ))
        })?;

    let rows = BookingRepo::list_by_email(&state.pool, &email).await?;

    let mut bookings = Vec::with_capacity(rows.len());
    for booking in rows {
        let messages = BookingMessageRepo::list_by_booking(&state.pool, booking.id).await?;
        bookings.push(BookingWithMessages { booking, messages });
    }

    tracing::debug!(count = bookings.len(), "Listed bookings by email");

    Ok(Json(LookupResponse { bookings }))
}
