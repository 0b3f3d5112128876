use adlint_core::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Pipeline errors translated to the external `{"error": ...}` shape.
/// Fetch failures are client-correctable (400); backend invocation failures
/// are upstream faults (502); parse failures are reported generically (500)
/// with the raw reply kept in diagnostics only.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Fetch(_) => StatusCode::BAD_REQUEST,
            Error::Auth(_) | Error::RateLimited(_) | Error::Network(_) | Error::EmptyReply(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &err {
            // Never echo the raw backend reply to the caller.
            Error::Parse { .. } => "The model returned an invalid response format.".to_string(),
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::info!(status = %self.status, message = %self.message, "request failed");
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_are_client_faults() {
        let api: ApiError = Error::Fetch("bad url".into()).into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.message.contains("bad url"));
    }

    #[test]
    fn backend_failures_are_upstream_faults() {
        for err in [
            Error::Auth("rejected".into()),
            Error::RateLimited("slow down".into()),
            Error::Network("timeout".into()),
            Error::EmptyReply("nothing".into()),
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn parse_failures_hide_the_raw_reply() {
        let api: ApiError = Error::parse("missing key", "secret raw reply").into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("secret raw reply"));
        assert_eq!(api.message, "The model returned an invalid response format.");
    }
}
