//! Submission validation: email shape, phone digit count, event-date
//! futurity, and the batched required-field check.
//!
//! These checks run only at the submission boundary. The intake state
//! machine accepts any string during collection; malformed input here is a
//! validation failure, never a panic.

use std::sync::LazyLock;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::booking::BookingSubmission;

/// `local@domain.tld` with an alphabetic TLD of 2+ characters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

/// Minimum digits for a valid phone number.
pub const PHONE_MIN_DIGITS: usize = 7;

/// Maximum digits for a valid phone number (international numbers).
pub const PHONE_MAX_DIGITS: usize = 15;

/// The fields every submission must carry, by their wire names.
///
/// Missing fields are reported together in one batched error, so the order
/// here is the order they appear in the message.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "eventType",
    "eventDate",
    "timePreference",
    "name",
    "email",
    "phone",
];

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Normalize and validate an email address.
///
/// Returns the trimmed, lowercased address if it matches the
/// `local@domain.tld` shape, `None` otherwise.
pub fn normalize_email(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    EMAIL_RE.is_match(&normalized).then_some(normalized)
}

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// Strip everything but ASCII digits.
pub fn strip_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// A phone number is valid iff its stripped digit count is in
/// [[`PHONE_MIN_DIGITS`], [`PHONE_MAX_DIGITS`]].
pub fn valid_phone(raw: &str) -> bool {
    let digits = strip_phone(raw).len();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

// ---------------------------------------------------------------------------
// Event date
// ---------------------------------------------------------------------------

/// Parse an event date from the wire.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` datetime, or a bare
/// `YYYY-MM-DD` date (interpreted as midnight UTC).
pub fn parse_event_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc());
    }
    None
}

/// The earliest instant an event may be booked for: tomorrow at the start
/// of day, UTC (today + 1 day, time zeroed).
pub fn earliest_bookable(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("date arithmetic in range");
    tomorrow
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc()
}

/// An event date passes iff it is strictly later than the
/// [`earliest_bookable`] boundary. Exactly tomorrow-at-midnight is
/// rejected; one second later is accepted.
pub fn event_date_is_bookable(event: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    event > earliest_bookable(now)
}

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

fn blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// The wire names of required fields missing from a submission.
///
/// All missing names are reported together so the client can correct the
/// whole form in one pass.
pub fn missing_required_fields(submission: &BookingSubmission) -> Vec<&'static str> {
    let checks: [(&'static str, &Option<String>); 6] = [
        ("eventType", &submission.event_type),
        ("eventDate", &submission.event_date),
        ("timePreference", &submission.time_preference),
        ("name", &submission.name),
        ("email", &submission.email),
        ("phone", &submission.phone),
    ];
    checks
        .into_iter()
        .filter(|(_, value)| blank(value))
        .map(|(name, _)| name)
        .collect()
}

/// Whether the submission carries at least one non-blank music style.
pub fn has_music_styles(submission: &BookingSubmission) -> bool {
    submission
        .music_styles
        .iter()
        .any(|style| !style.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
