//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_message_repo;
pub mod booking_repo;

pub use booking_message_repo::BookingMessageRepo;
pub use booking_repo::BookingRepo;
