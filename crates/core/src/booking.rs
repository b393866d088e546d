//! Booking domain types: submission payload, accumulated answers, status
//! vocabulary, and the "other"/"custom" sentinel resolution.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Booking status
// ---------------------------------------------------------------------------

/// Lifecycle status of a persisted booking.
///
/// Only [`Pending`](Self::Pending) is ever assigned by the submission
/// pipeline; the remaining transitions belong to the owner's back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'. Must be one of: pending, confirmed, completed, cancelled"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Submission payload
// ---------------------------------------------------------------------------

/// The raw booking submission as received on the wire.
///
/// Nothing here is validated at deserialization time; the submission
/// pipeline runs every check explicitly so that malformed input becomes a
/// descriptive validation error instead of a serde rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingSubmission {
    pub event_type: Option<String>,
    pub custom_event_type: Option<String>,
    pub event_date: Option<String>,
    pub time_preference: Option<String>,
    pub venue: Option<String>,
    pub guest_count: Option<String>,
    pub setting: Option<String>,
    pub duration: Option<String>,
    pub custom_duration: Option<String>,
    pub music_styles: Vec<String>,
    pub song_requests: Option<String>,
    pub special_requirements: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referral_source: Option<String>,
}

// ---------------------------------------------------------------------------
// Accumulated intake answers
// ---------------------------------------------------------------------------

/// Answers accumulated by the intake state machine across phases.
///
/// Every field is optional during collection; `music_styles` uses an empty
/// vector as "unanswered". No validation happens here, only at submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingAnswers {
    pub event_type: Option<String>,
    pub custom_event_type: Option<String>,
    pub event_date: Option<String>,
    pub time_preference: Option<String>,
    pub venue: Option<String>,
    pub guest_count: Option<String>,
    pub setting: Option<String>,
    pub duration: Option<String>,
    pub custom_duration: Option<String>,
    pub music_styles: Vec<String>,
    pub song_requests: Option<String>,
    pub special_requirements: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referral_source: Option<String>,
}

/// A single typed answer, applied to [`BookingAnswers`] via
/// [`BookingAnswers::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    EventType(String),
    CustomEventType(String),
    EventDate(String),
    TimePreference(String),
    Venue(String),
    GuestCount(String),
    Setting(String),
    Duration(String),
    CustomDuration(String),
    MusicStyles(Vec<String>),
    SongRequests(String),
    SpecialRequirements(String),
    Name(String),
    Email(String),
    Phone(String),
    ReferralSource(String),
}

impl BookingAnswers {
    /// Set one answer field.
    pub fn apply(&mut self, answer: Answer) {
        match answer {
            Answer::EventType(v) => self.event_type = Some(v),
            Answer::CustomEventType(v) => self.custom_event_type = Some(v),
            Answer::EventDate(v) => self.event_date = Some(v),
            Answer::TimePreference(v) => self.time_preference = Some(v),
            Answer::Venue(v) => self.venue = Some(v),
            Answer::GuestCount(v) => self.guest_count = Some(v),
            Answer::Setting(v) => self.setting = Some(v),
            Answer::Duration(v) => self.duration = Some(v),
            Answer::CustomDuration(v) => self.custom_duration = Some(v),
            Answer::MusicStyles(v) => self.music_styles = v,
            Answer::SongRequests(v) => self.song_requests = Some(v),
            Answer::SpecialRequirements(v) => self.special_requirements = Some(v),
            Answer::Name(v) => self.name = Some(v),
            Answer::Email(v) => self.email = Some(v),
            Answer::Phone(v) => self.phone = Some(v),
            Answer::ReferralSource(v) => self.referral_source = Some(v),
        }
    }

    /// Merge a partial patch into this accumulator.
    ///
    /// `Some` fields and a non-empty `music_styles` overwrite; `None`
    /// fields leave the existing answer in place.
    pub fn merge(&mut self, patch: BookingAnswers) {
        macro_rules! take_some {
            ($($field:ident),+) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field;
                })+
            };
        }
        take_some!(
            event_type,
            custom_event_type,
            event_date,
            time_preference,
            venue,
            guest_count,
            setting,
            duration,
            custom_duration,
            song_requests,
            special_requirements,
            name,
            email,
            phone,
            referral_source
        );
        if !patch.music_styles.is_empty() {
            self.music_styles = patch.music_styles;
        }
    }
}

// ---------------------------------------------------------------------------
// Sentinel resolution
// ---------------------------------------------------------------------------

/// Sentinel choice that redirects to the free-text event type override.
pub const EVENT_TYPE_SENTINEL: &str = "other";

/// Sentinel choice that redirects to the free-text duration override.
pub const DURATION_SENTINEL: &str = "custom";

/// Display label used when the event type is "other" with no override text.
pub const EVENT_TYPE_FALLBACK: &str = "Other event";

/// Display label used when the duration is "custom" with no override text,
/// or missing entirely.
pub const DURATION_FALLBACK: &str = "To be discussed";

/// Resolve the effective display value for an enum-plus-override field.
///
/// When `value` equals the sentinel (case-insensitive), the trimmed custom
/// text wins if non-empty, else the fallback label. A missing `value` also
/// resolves to the fallback label.
pub fn resolve_choice(
    value: Option<&str>,
    custom: Option<&str>,
    sentinel: &str,
    fallback: &str,
) -> String {
    match value {
        Some(v) if v.eq_ignore_ascii_case(sentinel) => match custom.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => fallback.to_string(),
        },
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Effective event type for a submission.
pub fn resolve_event_type(submission: &BookingSubmission) -> String {
    resolve_choice(
        submission.event_type.as_deref(),
        submission.custom_event_type.as_deref(),
        EVENT_TYPE_SENTINEL,
        EVENT_TYPE_FALLBACK,
    )
}

/// Effective performance duration for a submission.
pub fn resolve_duration(submission: &BookingSubmission) -> String {
    resolve_choice(
        submission.duration.as_deref(),
        submission.custom_duration.as_deref(),
        DURATION_SENTINEL,
        DURATION_FALLBACK,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- BookingStatus --

    #[test]
    fn status_as_str_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_from_str_invalid() {
        assert_matches!(
            BookingStatus::from_str_db("archived"),
            Err(CoreError::Validation(_))
        );
        assert!(BookingStatus::from_str_db("").is_err());
    }

    // -- apply / merge --

    #[test]
    fn apply_sets_single_fields() {
        let mut answers = BookingAnswers::default();
        answers.apply(Answer::EventType("Wedding".into()));
        answers.apply(Answer::MusicStyles(vec!["Jazz".into()]));
        assert_eq!(answers.event_type.as_deref(), Some("Wedding"));
        assert_eq!(answers.music_styles, vec!["Jazz"]);
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut answers = BookingAnswers {
            event_type: Some("Wedding".into()),
            venue: Some("Fort Garry Hotel".into()),
            ..Default::default()
        };
        answers.merge(BookingAnswers {
            event_type: Some("Corporate".into()),
            name: Some("Jane".into()),
            ..Default::default()
        });
        assert_eq!(answers.event_type.as_deref(), Some("Corporate"));
        assert_eq!(answers.venue.as_deref(), Some("Fort Garry Hotel"));
        assert_eq!(answers.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn merge_keeps_existing_music_styles_when_patch_is_empty() {
        let mut answers = BookingAnswers {
            music_styles: vec!["Classical".into()],
            ..Default::default()
        };
        answers.merge(BookingAnswers::default());
        assert_eq!(answers.music_styles, vec!["Classical"]);
    }

    // -- sentinel resolution --

    #[test]
    fn resolve_plain_choice_passes_through() {
        assert_eq!(
            resolve_choice(Some("Wedding"), None, EVENT_TYPE_SENTINEL, EVENT_TYPE_FALLBACK),
            "Wedding"
        );
    }

    #[test]
    fn resolve_sentinel_uses_custom_text() {
        assert_eq!(
            resolve_choice(
                Some("other"),
                Some("  Barn dance  "),
                EVENT_TYPE_SENTINEL,
                EVENT_TYPE_FALLBACK
            ),
            "Barn dance"
        );
    }

    #[test]
    fn resolve_sentinel_without_custom_uses_fallback() {
        assert_eq!(
            resolve_choice(Some("Other"), Some("   "), EVENT_TYPE_SENTINEL, EVENT_TYPE_FALLBACK),
            EVENT_TYPE_FALLBACK
        );
        assert_eq!(
            resolve_choice(Some("other"), None, EVENT_TYPE_SENTINEL, EVENT_TYPE_FALLBACK),
            EVENT_TYPE_FALLBACK
        );
    }

    #[test]
    fn resolve_missing_duration_uses_fallback() {
        let submission = BookingSubmission::default();
        assert_eq!(resolve_duration(&submission), DURATION_FALLBACK);
    }

    #[test]
    fn resolve_custom_duration() {
        let submission = BookingSubmission {
            duration: Some("custom".into()),
            custom_duration: Some("Two 45-minute sets".into()),
            ..Default::default()
        };
        assert_eq!(resolve_duration(&submission), "Two 45-minute sets");
    }

    // -- wire format --

    #[test]
    fn submission_deserializes_camel_case() {
        let json = serde_json::json!({
            "eventType": "Wedding",
            "eventDate": "2031-06-15",
            "timePreference": "Evening",
            "musicStyles": ["Classical", "Jazz"],
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "204-555-0123"
        });
        let submission: BookingSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(submission.event_type.as_deref(), Some("Wedding"));
        assert_eq!(submission.music_styles, vec!["Classical", "Jazz"]);
        assert!(submission.venue.is_none());
    }
}
