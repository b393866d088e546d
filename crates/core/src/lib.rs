//! Core domain logic for the Cadenza booking platform.
//!
//! Everything in this crate is pure: no I/O, no async, no database. The
//! API, notification, and assistant crates compose these building blocks.

pub mod assistant;
pub mod booking;
pub mod error;
pub mod intake;
pub mod rate_limit;
pub mod reference;
pub mod sanitize;
pub mod types;
pub mod validate;
