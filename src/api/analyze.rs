//! Text analysis endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClassifyError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub result: String,
    pub confidence: f64,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", post(analyze))
}

/// POST /analyze - classify a single piece of text.
///
/// The body is taken raw rather than through the `Json` extractor: a body
/// that is not valid JSON, or not an object, is treated as an empty request
/// and answered with the validation error instead of a framework rejection.
async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ClassifyError> {
    let text = extract_text(&body);
    if text.is_empty() {
        return Err(ClassifyError::EmptyInput);
    }

    match state.classifier.classify(&text).await {
        Ok(sentiment) => Ok(Json(AnalyzeResponse {
            status: "success",
            result: sentiment.label,
            confidence: sentiment.confidence,
        })),
        Err(error) => {
            // Kind and message only; the submitted text stays out of the logs.
            tracing::warn!(kind = error.kind(), error = %error, "classification failed");
            Err(error)
        }
    }
}

/// Pull the trimmed `text` field out of a raw request body, defaulting to
/// empty on any parse or shape mismatch.
fn extract_text(body: &[u8]) -> String {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return String::new(),
    };

    value
        .get("text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_trims_whitespace() {
        assert_eq!(extract_text(br#"{"text": "  hello  "}"#), "hello");
    }

    #[test]
    fn test_extract_text_missing_field() {
        assert_eq!(extract_text(br#"{"other": "value"}"#), "");
    }

    #[test]
    fn test_extract_text_invalid_json() {
        assert_eq!(extract_text(b"not json at all"), "");
        assert_eq!(extract_text(b""), "");
        assert_eq!(extract_text(&[0xff, 0xfe]), "");
    }

    #[test]
    fn test_extract_text_non_object_body() {
        assert_eq!(extract_text(br#"["text"]"#), "");
        assert_eq!(extract_text(b"42"), "");
    }

    #[test]
    fn test_extract_text_non_string_field() {
        assert_eq!(extract_text(br#"{"text": 42}"#), "");
        assert_eq!(extract_text(br#"{"text": null}"#), "");
    }
}
