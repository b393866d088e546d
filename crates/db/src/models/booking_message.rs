//! Booking message thread entity model.
//!
//! Messages are an opaque collaborator collection from the booking
//! pipeline's point of view: the lookup endpoint returns them alongside
//! each booking, nothing in this core writes them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cadenza_core::types::{DbId, Timestamp};

/// A row from the `booking_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingMessage {
    pub id: DbId,
    pub booking_id: DbId,
    pub sender: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for appending a message to a booking's thread.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingMessage {
    pub sender: String,
    pub body: String,
}
