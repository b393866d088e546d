//! Process-local fixed-window rate limiter.
//!
//! One instance is constructed at startup and injected through the
//! application state; it is never a module-level global, so it can be
//! swapped for a distributed store without touching call sites. State is
//! process-local only; this is a best-effort single-instance throttle.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
}

struct WindowEntry {
    count: u32,
    window_ends_at: Instant,
}

/// Fixed-window counter keyed by caller identifier.
///
/// Entries past their reset time are lazily evicted on each check call;
/// there is no background sweep. Safe for concurrent use: every check is
/// a single locked increment-and-compare.
#[derive(Default)]
pub struct RateLimiter {
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request against `identifier`'s current window.
    ///
    /// Each calling endpoint supplies its own limit/window pair. The
    /// first call for an identifier (or the first after its window
    /// lapsed) opens a fresh window.
    pub fn check(&self, identifier: &str, limit: u32, window: Duration) -> RateDecision {
        self.check_at(identifier, limit, window, Instant::now())
    }

    fn check_at(
        &self,
        identifier: &str,
        limit: u32,
        window: Duration,
        now: Instant,
    ) -> RateDecision {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Lazy eviction of expired windows.
        entries.retain(|_, entry| entry.window_ends_at > now);

        let entry = entries
            .entry(identifier.to_string())
            .or_insert(WindowEntry {
                count: 0,
                window_ends_at: now + window,
            });

        if entry.count < limit {
            entry.count += 1;
            RateDecision {
                allowed: true,
                remaining: limit - entry.count,
            }
        } else {
            RateDecision {
                allowed: false,
                remaining: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for expected_remaining in (0..3).rev() {
            let decision = limiter.check_at("203.0.113.7", 3, WINDOW, now);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let decision = limiter.check_at("203.0.113.7", 3, WINDOW, now);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn fresh_window_after_expiry() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for _ in 0..3 {
            limiter.check_at("203.0.113.7", 3, WINDOW, now);
        }
        assert!(!limiter.check_at("203.0.113.7", 3, WINDOW, now).allowed);

        let later = now + WINDOW + Duration::from_millis(1);
        let decision = limiter.check_at("203.0.113.7", 3, WINDOW, later);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
    }

    #[test]
    fn identifiers_are_independent() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        assert!(limiter.check_at("a", 1, WINDOW, now).allowed);
        assert!(!limiter.check_at("a", 1, WINDOW, now).allowed);
        assert!(limiter.check_at("b", 1, WINDOW, now).allowed);
    }

    #[test]
    fn expired_entries_are_evicted_on_check() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        limiter.check_at("stale", 5, WINDOW, now);
        let later = now + WINDOW + Duration::from_secs(1);
        limiter.check_at("fresh", 5, WINDOW, later);

        let entries = limiter.entries.lock().unwrap();
        assert!(!entries.contains_key("stale"));
        assert!(entries.contains_key("fresh"));
    }
}
