//! Normalization of raw classifier responses into a canonical result.
//!
//! The remote classifier does not guarantee a response shape. Observed
//! variants: a flat `{label, score}` object, a list with one such object, a
//! list containing one ranked list of candidates, and an `{error}` object.
//! Anything that cannot be resolved to a (label, score) pair becomes a
//! `Malformed` error carrying the raw payload for diagnostics.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClassifyError;

/// Canonical classification verdict returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    pub label: String,
    pub confidence: f64,
}

/// Fixed remap for models that report positional label names.
const LABEL_SYNONYMS: &[(&str, &str)] = &[("LABEL_0", "NEGATIVE"), ("LABEL_1", "POSITIVE")];

/// Resolve a parsed classifier response into a canonical result.
///
/// Pure and total: any JSON value terminates in either a `Sentiment` or a
/// `ClassifyError::Malformed`, never a panic.
pub fn normalize(raw: Value) -> Result<Sentiment, ClassifyError> {
    match extract(&raw) {
        Some(sentiment) => Ok(sentiment),
        None => Err(ClassifyError::Malformed {
            message: "no labeled candidate in classifier response".to_string(),
            raw: Some(raw),
        }),
    }
}

fn extract(raw: &Value) -> Option<Sentiment> {
    let object = top_candidate(raw)?;
    let label = object.get("label")?.as_str()?;
    let score = object.get("score")?.as_f64()?;
    Some(Sentiment {
        label: remap_label(label),
        confidence: score.clamp(0.0, 1.0),
    })
}

/// Select the highest-ranked candidate object from the observed shapes.
///
/// A list wraps one entry per input item; when that entry is itself a list it
/// holds ranked candidates and the first one wins.
fn top_candidate(raw: &Value) -> Option<&Map<String, Value>> {
    match raw {
        Value::Array(items) => match items.first()? {
            Value::Array(ranked) => ranked.first()?.as_object(),
            Value::Object(object) => Some(object),
            _ => None,
        },
        Value::Object(object) => Some(object),
        _ => None,
    }
}

fn remap_label(label: &str) -> String {
    LABEL_SYNONYMS
        .iter()
        .find(|(from, _)| *from == label)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| label.to_string())
}
