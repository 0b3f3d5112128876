use std::fmt;

use adlint_core::{Error, ModelReply, ModelRequest, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

pub mod gemini;
pub mod openai;

pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

/// A single request/response exchange with a generative-AI service.
/// Implementations perform exactly one attempt; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait ModelBackend: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn invoke(&self, request: &ModelRequest) -> Result<ModelReply>;
}

/// Maps a non-success HTTP status to the invocation error taxonomy.
pub(crate) fn classify_status(backend: &str, status: StatusCode, detail: &str) -> Error {
    let message = format!("{} returned {}: {}", backend, status, detail);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited(message),
        _ => Error::Network(message),
    }
}

/// Transport-level failures (connect, timeout, body read) become [`Error::Network`];
/// anything carrying a status is classified like a response.
pub(crate) fn transport_error(backend: &str, err: reqwest::Error) -> Error {
    match err.status() {
        Some(status) => classify_status(backend, status, &err.to_string()),
        None => Error::Network(format!("{} request failed: {}", backend, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_rejections_are_auth_errors() {
        assert!(matches!(
            classify_status("test", StatusCode::UNAUTHORIZED, "bad key"),
            Error::Auth(_)
        ));
        assert!(matches!(
            classify_status("test", StatusCode::FORBIDDEN, "no access"),
            Error::Auth(_)
        ));
    }

    #[test]
    fn throttling_is_rate_limited() {
        assert!(matches!(
            classify_status("test", StatusCode::TOO_MANY_REQUESTS, "slow down"),
            Error::RateLimited(_)
        ));
    }

    #[test]
    fn other_statuses_are_network_errors() {
        assert!(matches!(
            classify_status("test", StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            Error::Network(_)
        ));
        assert!(matches!(
            classify_status("test", StatusCode::BAD_REQUEST, "bad payload"),
            Error::Network(_)
        ));
    }
}
