//! Integration tests for booking persistence.

use chrono::NaiveDate;
use sqlx::PgPool;

use cadenza_db::models::booking::NewBooking;
use cadenza_db::models::booking_message::CreateBookingMessage;
use cadenza_db::repositories::{booking_repo, BookingMessageRepo, BookingRepo};

fn sample_booking(reference: &str, email: &str) -> NewBooking {
    NewBooking {
        reference: reference.to_string(),
        status: "pending",
        event_type: "Wedding".to_string(),
        event_date: NaiveDate::from_ymd_opt(2031, 6, 15).unwrap(),
        time_preference: "Evening".to_string(),
        venue: Some("Fort Garry Hotel".to_string()),
        guest_count: Some("50-100".to_string()),
        setting: None,
        duration: "2 hours".to_string(),
        music_styles: vec!["Classical".to_string(), "Jazz".to_string()],
        song_requests: None,
        special_requirements: None,
        contact_name: "Jane Doe".to_string(),
        contact_email: email.to_string(),
        contact_phone: "2045550123".to_string(),
        referral_source: None,
    }
}

#[sqlx::test]
async fn insert_returns_full_row_with_pending_status(pool: PgPool) {
    let booking = BookingRepo::insert(&pool, &sample_booking("BK-20310615-AB12", "jane@example.com"))
        .await
        .unwrap();

    assert!(booking.id > 0);
    assert_eq!(booking.reference, "BK-20310615-AB12");
    assert_eq!(booking.status, "pending");
    // Array column preserves insertion order.
    assert_eq!(booking.music_styles, vec!["Classical", "Jazz"]);
}

#[sqlx::test]
async fn duplicate_reference_is_a_detectable_conflict(pool: PgPool) {
    BookingRepo::insert(&pool, &sample_booking("BK-20310615-AB12", "jane@example.com"))
        .await
        .unwrap();

    let err = BookingRepo::insert(&pool, &sample_booking("BK-20310615-AB12", "other@example.com"))
        .await
        .unwrap_err();

    assert!(booking_repo::is_reference_conflict(&err));
}

#[sqlx::test]
async fn find_by_reference(pool: PgPool) {
    BookingRepo::insert(&pool, &sample_booking("BK-20310615-CD34", "jane@example.com"))
        .await
        .unwrap();

    let found = BookingRepo::find_by_reference(&pool, "BK-20310615-CD34")
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = BookingRepo::find_by_reference(&pool, "BK-20310615-ZZZZ")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn list_by_email_newest_first(pool: PgPool) {
    BookingRepo::insert(&pool, &sample_booking("BK-20310615-AA11", "jane@example.com"))
        .await
        .unwrap();
    BookingRepo::insert(&pool, &sample_booking("BK-20310615-BB22", "jane@example.com"))
        .await
        .unwrap();
    BookingRepo::insert(&pool, &sample_booking("BK-20310615-CC33", "other@example.com"))
        .await
        .unwrap();

    let bookings = BookingRepo::list_by_email(&pool, "jane@example.com")
        .await
        .unwrap();

    assert_eq!(bookings.len(), 2);
    assert!(bookings[0].created_at >= bookings[1].created_at);
}

#[sqlx::test]
async fn message_thread_roundtrip(pool: PgPool) {
    let booking = BookingRepo::insert(&pool, &sample_booking("BK-20310615-DD44", "jane@example.com"))
        .await
        .unwrap();

    BookingMessageRepo::create(
        &pool,
        booking.id,
        &CreateBookingMessage {
            sender: "owner".to_string(),
            body: "Thanks for your booking!".to_string(),
        },
    )
    .await
    .unwrap();

    let messages = BookingMessageRepo::list_by_booking(&pool, booking.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, "owner");
}
