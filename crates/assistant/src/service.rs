//! The assistant service: generation with guaranteed fallback.

use std::sync::Arc;
use std::time::Duration;

use cadenza_core::assistant::{fallback_response, AssistantRequest};

use crate::client::GenerationClient;
use crate::prompt;

/// Response-length cap passed to the provider. Keeps latency and cost
/// predictable; 1-2 sentences fit comfortably.
pub const MAX_RESPONSE_TOKENS: u32 = 120;

/// Hard ceiling on one generation call, over and above the HTTP client's
/// own timeout. After this the service falls back exactly as on error.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Generates touchpoint responses, falling back to static text whenever
/// the provider is unconfigured, slow, or broken.
///
/// `generate` cannot fail: callers always receive a usable string.
pub struct AssistantService {
    client: Option<Arc<dyn GenerationClient>>,
    timeout: Duration,
}

impl AssistantService {
    /// Create a service over an optional provider client. `None` means
    /// fallback-only, a valid deployment.
    pub fn new(client: Option<Arc<dyn GenerationClient>>) -> Self {
        Self {
            client,
            timeout: GENERATION_TIMEOUT,
        }
    }

    /// Override the generation timeout. For tests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce a response for one touchpoint invocation.
    ///
    /// Input hardening and prompt assembly happen here; any failure from
    /// the provider (missing client, network, HTTP status, malformed
    /// body, timeout, blank completion) yields the touchpoint's static
    /// fallback and a WARN log entry.
    pub async fn generate(&self, request: &AssistantRequest) -> String {
        let fallback = fallback_response(request.touchpoint);

        let Some(client) = &self.client else {
            return fallback.to_string();
        };

        let user_prompt = prompt::build_user_prompt(request);
        let call = client.complete(prompt::SYSTEM_PROMPT, &user_prompt, MAX_RESPONSE_TOKENS);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                tracing::warn!(
                    touchpoint = request.touchpoint.as_tag(),
                    "Generation returned a blank completion; using fallback"
                );
                fallback.to_string()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    touchpoint = request.touchpoint.as_tag(),
                    error = %e,
                    "Generation failed; using fallback"
                );
                fallback.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    touchpoint = request.touchpoint.as_tag(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Generation timed out; using fallback"
                );
                fallback.to_string()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cadenza_core::assistant::{Touchpoint, ALL_TOUCHPOINTS};

    use crate::client::GenerationError;

    struct FailingClient;

    #[async_trait]
    impl GenerationClient for FailingClient {
        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, GenerationError> {
            Err(GenerationError::HttpStatus(503))
        }
    }

    struct CannedClient(&'static str);

    #[async_trait]
    impl GenerationClient for CannedClient {
        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct SlowClient;

    #[async_trait]
    impl GenerationClient for SlowClient {
        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }
    }

    fn request_for(touchpoint: Touchpoint) -> AssistantRequest {
        AssistantRequest {
            touchpoint,
            phase: 1,
            question: None,
            user_answer: None,
            booking_data: None,
            user_name: None,
        }
    }

    #[tokio::test]
    async fn provider_failure_yields_touchpoint_fallback_for_all_six() {
        let service = AssistantService::new(Some(Arc::new(FailingClient)));
        for touchpoint in ALL_TOUCHPOINTS {
            let response = service.generate(&request_for(touchpoint)).await;
            assert_eq!(response, fallback_response(touchpoint));
        }
    }

    #[tokio::test]
    async fn unconfigured_service_uses_fallback() {
        let service = AssistantService::new(None);
        let response = service.generate(&request_for(Touchpoint::ReviewSummary)).await;
        assert_eq!(response, fallback_response(Touchpoint::ReviewSummary));
    }

    #[tokio::test]
    async fn successful_generation_passes_through_trimmed() {
        let service = AssistantService::new(Some(Arc::new(CannedClient(
            "  What a lovely venue choice!  ",
        ))));
        let response = service.generate(&request_for(Touchpoint::OtherFollowup)).await;
        assert_eq!(response, "What a lovely venue choice!");
    }

    #[tokio::test]
    async fn blank_completion_yields_fallback() {
        let service = AssistantService::new(Some(Arc::new(CannedClient("   "))));
        let response = service.generate(&request_for(Touchpoint::SongResponse)).await;
        assert_eq!(response, fallback_response(Touchpoint::SongResponse));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out_to_fallback() {
        let service = AssistantService::new(Some(Arc::new(SlowClient)))
            .with_timeout(Duration::from_millis(50));
        let response = service.generate(&request_for(Touchpoint::PhaseTransition)).await;
        assert_eq!(response, fallback_response(Touchpoint::PhaseTransition));
    }
}
