//! Repository for the `booking_messages` table.

use sqlx::PgPool;

use cadenza_core::types::DbId;

use crate::models::booking_message::{BookingMessage, CreateBookingMessage};

/// Column list for `booking_messages` queries.
const COLUMNS: &str = "id, booking_id, sender, body, created_at";

/// Provides operations for booking message threads.
pub struct BookingMessageRepo;

impl BookingMessageRepo {
    /// Append a message to a booking's thread.
    pub async fn create(
        pool: &PgPool,
        booking_id: DbId,
        message: &CreateBookingMessage,
    ) -> Result<BookingMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO booking_messages (booking_id, sender, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingMessage>(&query)
            .bind(booking_id)
            .bind(&message.sender)
            .bind(&message.body)
            .fetch_one(pool)
            .await
    }

    /// List a booking's messages, oldest first.
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<BookingMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM booking_messages \
             WHERE booking_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, BookingMessage>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }
}
