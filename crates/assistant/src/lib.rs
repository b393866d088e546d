//! Scripted assistant response generation for the booking flow.
//!
//! The assistant produces short decorative text at fixed touchpoints. It
//! is strictly non-authoritative: it never decides which question comes
//! next, never validates answers, and the booking flow works unchanged
//! when every generation call fails. Failures of any kind collapse to the
//! static fallback string for the touchpoint.

pub mod client;
pub mod prompt;
pub mod service;

pub use client::{GenerationClient, GenerationConfig, GenerationError, HttpGenerationClient};
pub use service::AssistantService;
