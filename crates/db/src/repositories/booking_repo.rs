//! Repository for the `bookings` table.

use sqlx::PgPool;

use cadenza_core::types::DbId;

use crate::models::booking::{Booking, NewBooking};

/// Column list for `bookings` queries.
const COLUMNS: &str = "id, reference, status, event_type, event_date, time_preference, \
     venue, guest_count, setting, duration, music_styles, song_requests, \
     special_requirements, contact_name, contact_email, contact_phone, \
     referral_source, created_at";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking.
    ///
    /// The `uq_bookings_reference` constraint makes a duplicate reference
    /// surface as a database error (code 23505); the submission pipeline
    /// regenerates and retries on that specific failure.
    pub async fn insert(pool: &PgPool, booking: &NewBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (reference, status, event_type, event_date, \
             time_preference, venue, guest_count, setting, duration, music_styles, \
             song_requests, special_requirements, contact_name, contact_email, \
             contact_phone, referral_source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(&booking.reference)
            .bind(booking.status)
            .bind(&booking.event_type)
            .bind(booking.event_date)
            .bind(&booking.time_preference)
            .bind(&booking.venue)
            .bind(&booking.guest_count)
            .bind(&booking.setting)
            .bind(&booking.duration)
            .bind(&booking.music_styles)
            .bind(&booking.song_requests)
            .bind(&booking.special_requirements)
            .bind(&booking.contact_name)
            .bind(&booking.contact_email)
            .bind(&booking.contact_phone)
            .bind(&booking.referral_source)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking by its unique reference.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE reference = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// List bookings for a contact email, newest first.
    pub async fn list_by_email(
        pool: &PgPool,
        contact_email: &str,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE contact_email = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(contact_email)
            .fetch_all(pool)
            .await
    }
}

/// Whether a sqlx error is a unique-constraint violation on the booking
/// reference (PostgreSQL error code 23505 on `uq_bookings_reference`).
pub fn is_reference_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_bookings_reference")
        }
        _ => false,
    }
}
