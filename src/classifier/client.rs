//! HTTP client for the remote text-classification service.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::normalize::{normalize, Sentiment};
use crate::config::ClassifierConfig;
use crate::error::ClassifyError;

/// Client for a remote text-classification endpoint.
///
/// One instance is built at startup and shared across requests; it holds no
/// mutable state.
pub struct ClassifierClient {
    http_client: Client,
    url: String,
    api_token: Option<String>,
    timeout: Duration,
}

/// Outbound inference request payload.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

/// `wait_for_model` asks the remote to block on a cold model instead of
/// failing immediately, absorbing most warm-up churn into one call.
#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            http_client: Client::new(),
            url: config.url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Classify `text`, returning a canonical (label, confidence) verdict.
    ///
    /// Every failure mode of the round-trip terminates in a `ClassifyError`;
    /// nothing escapes as a panic.
    pub async fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError> {
        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions { wait_for_model: true },
        };

        let mut builder = self
            .http_client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(classify_failure(status, body));
        }

        if body.trim().is_empty() {
            return Err(ClassifyError::Malformed {
                message: "empty response body".to_string(),
                raw: None,
            });
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| ClassifyError::Malformed {
            message: format!("response is not valid JSON: {}", e),
            raw: Some(Value::String(body.clone())),
        })?;

        normalize(raw)
    }
}

fn map_transport_error(error: reqwest::Error) -> ClassifyError {
    if error.is_timeout() {
        ClassifyError::Timeout
    } else {
        ClassifyError::Unexpected(error.to_string())
    }
}

/// Classify a non-2xx upstream response.
///
/// A body shaped like `{"error": "... loading ..."}` marks the transient
/// model-warming state and is reported as `Loading`; everything else is a
/// hard upstream failure carrying the raw body.
fn classify_failure(status: StatusCode, body: String) -> ClassifyError {
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if let Some(Value::Object(object)) = &parsed {
        if let Some(Value::String(message)) = object.get("error") {
            if message.to_ascii_lowercase().contains("loading") {
                return ClassifyError::Loading(message.clone());
            }
        }
    }

    ClassifyError::Upstream {
        status: status.as_u16(),
        body: parsed.or_else(|| (!body.is_empty()).then(|| Value::String(body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classifier_url_normalization() {
        let client = ClassifierClient::new(&ClassifierConfig {
            url: "http://localhost:9000/models/sentiment/".to_string(),
            api_token: None,
            timeout_secs: 60,
        });
        assert_eq!(client.url, "http://localhost:9000/models/sentiment");
    }

    #[test]
    fn test_loading_body_classified_as_loading() {
        let body = json!({"error": "Model X is currently loading"}).to_string();
        let err = classify_failure(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(err.kind(), "loading");
    }

    #[test]
    fn test_non_loading_error_body_is_upstream() {
        let body = json!({"error": "invalid token"}).to_string();
        let err = classify_failure(StatusCode::UNAUTHORIZED, body);
        match err {
            ClassifyError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, Some(json!({"error": "invalid token"})));
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_body_kept_as_string() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "<html>oops</html>".to_string());
        match err {
            ClassifyError::Upstream { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, Some(Value::String("<html>oops</html>".to_string())));
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_body_carries_no_payload() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        match err {
            ClassifyError::Upstream { body, .. } => assert!(body.is_none()),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_request_payload_shape() {
        let request = InferenceRequest {
            inputs: "I love this",
            options: InferenceOptions { wait_for_model: true },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"inputs": "I love this", "options": {"wait_for_model": true}})
        );
    }
}
