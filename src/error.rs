//! Error types for classification requests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Terminal outcome of a failed classification request.
///
/// Every failure mode of the remote classifier is converted into one of
/// these variants at the client boundary; none propagate as panics.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("No text provided")]
    EmptyInput,

    #[error("Classifier model is loading: {0}")]
    Loading(String),

    #[error("Classifier returned HTTP {status}")]
    Upstream {
        status: u16,
        body: Option<serde_json::Value>,
    },

    #[error("Unrecognized classifier response: {message}")]
    Malformed {
        message: String,
        raw: Option<serde_json::Value>,
    },

    #[error("Classifier call exceeded the deadline")]
    Timeout,

    #[error("Classifier call failed: {0}")]
    Unexpected(String),
}

impl ClassifyError {
    /// Stable machine-readable kind, used in response bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::EmptyInput => "empty_input",
            ClassifyError::Loading(_) => "loading",
            ClassifyError::Upstream { .. } => "upstream_error",
            ClassifyError::Malformed { .. } => "malformed_response",
            ClassifyError::Timeout => "timeout",
            ClassifyError::Unexpected(_) => "unexpected",
        }
    }

    /// Raw upstream payload captured for diagnostics, when one exists.
    pub fn upstream_payload(&self) -> Option<&serde_json::Value> {
        match self {
            ClassifyError::Upstream { body, .. } => body.as_ref(),
            ClassifyError::Malformed { raw, .. } => raw.as_ref(),
            _ => None,
        }
    }
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        // Input validation keeps the bare reference body; everything else
        // reports through the status/kind envelope.
        if matches!(self, ClassifyError::EmptyInput) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response();
        }

        let status = match &self {
            ClassifyError::EmptyInput => StatusCode::BAD_REQUEST,
            ClassifyError::Loading(_) => StatusCode::SERVICE_UNAVAILABLE,
            ClassifyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ClassifyError::Malformed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ClassifyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ClassifyError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut body = json!({
            "status": "error",
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(payload) = self.upstream_payload() {
            body["upstream"] = payload.clone();
        }
        if let ClassifyError::Upstream { status, .. } = &self {
            body["upstream_status"] = json!(status);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ClassifyError::EmptyInput.kind(), "empty_input");
        assert_eq!(ClassifyError::Loading("warming".into()).kind(), "loading");
        assert_eq!(
            ClassifyError::Upstream { status: 500, body: None }.kind(),
            "upstream_error"
        );
        assert_eq!(ClassifyError::Timeout.kind(), "timeout");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ClassifyError::EmptyInput, StatusCode::BAD_REQUEST),
            (
                ClassifyError::Loading("warming".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ClassifyError::Upstream { status: 500, body: None },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ClassifyError::Malformed {
                    message: "bad shape".into(),
                    raw: None,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ClassifyError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (
                ClassifyError::Unexpected("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
