//! Booking entity model and insert DTO.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use cadenza_core::types::{DbId, Timestamp};

/// A row from the `bookings` table.
///
/// The reference is globally unique and immutable once assigned. Rows are
/// created exactly once per successful submission; status transitions
/// belong to the owner's back office and never happen here.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub reference: String,
    pub status: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub time_preference: String,
    pub venue: Option<String>,
    pub guest_count: Option<String>,
    pub setting: Option<String>,
    pub duration: String,
    pub music_styles: Vec<String>,
    pub song_requests: Option<String>,
    pub special_requirements: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub referral_source: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for a new booking, produced by the submission pipeline
/// after validation and sanitization.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub reference: String,
    pub status: &'static str,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub time_preference: String,
    pub venue: Option<String>,
    pub guest_count: Option<String>,
    pub setting: Option<String>,
    pub duration: String,
    pub music_styles: Vec<String>,
    pub song_requests: Option<String>,
    pub special_requirements: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub referral_source: Option<String>,
}
