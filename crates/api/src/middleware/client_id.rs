//! Caller identification for rate limiting.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// The rate-limit identifier for the calling client.
///
/// Prefers the first entry of `x-forwarded-for` (the client as seen by a
/// fronting proxy), then the peer address recorded by
/// `into_make_service_with_connect_info`, then a shared `"unknown"`
/// bucket. Extraction never fails; an unidentifiable caller is still
/// throttled.
///
/// ```ignore
/// async fn my_handler(ClientId(caller): ClientId) -> AppResult<Json<()>> {
///     state.rate_limiter.check(&caller, LIMIT, WINDOW);
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientId(pub String);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let identifier = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, ()) = request.into_parts();
        let ClientId(identifier) = ClientId::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        identifier
    }

    #[tokio::test]
    async fn prefers_forwarded_for_over_peer() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        let peer: SocketAddr = "192.0.2.1:443".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));

        assert_eq!(extract(request).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn falls_back_to_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        let peer: SocketAddr = "192.0.2.1:443".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));

        assert_eq!(extract(request).await, "192.0.2.1");
    }

    #[tokio::test]
    async fn unidentifiable_caller_shares_a_bucket() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, "unknown");
    }
}
