use std::sync::Arc;

use cadenza_assistant::AssistantService;
use cadenza_core::rate_limit::RateLimiter;
use cadenza_notify::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The rate limiter is the one piece of genuinely shared mutable state;
/// constructing it here, once per process, keeps it injectable and
/// replaceable by a distributed store without touching call sites.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cadenza_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fixed-window rate limiter guarding the mutating endpoints.
    pub rate_limiter: Arc<RateLimiter>,
    /// Assistant response service (generation with guaranteed fallback).
    pub assistant: Arc<AssistantService>,
    /// Fire-and-forget booking notification dispatcher.
    pub notifier: Arc<Dispatcher>,
}
