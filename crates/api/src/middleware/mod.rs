//! Request extractors shared by handlers.

pub mod client_id;

pub use client_id::ClientId;
