//! Maps raw SearXNG replies onto the canonical [`SearchResponse`].
//!
//! Upstream payloads are loosely shaped: fields go missing, numbers arrive as
//! strings, answers are sometimes objects and sometimes plain text. Each
//! result entry is mapped independently against the defaults in
//! [`SearchResult::default`], so one odd entry never costs the whole page.

use serde_json::{Map, Value};

use crate::error::SearchError;
use crate::types::{SearchResponse, SearchResult};

/// Normalise an HTTP reply into a [`SearchResponse`].
///
/// Never fails: every failure is folded into the response's error field.
pub fn normalize(status: u16, body: &[u8], query: &str) -> SearchResponse {
    let response = SearchResponse::from_outcome(query, try_normalize(status, body, query));
    if let Some(kind) = response.error_kind() {
        tracing::debug!(status, error_kind = %kind, "SearXNG reply normalised to error");
    } else {
        tracing::debug!(
            status,
            results = response.result_count(),
            total = response.number_of_results(),
            "SearXNG reply normalised"
        );
    }
    response
}

/// Normalise an HTTP reply, returning the failure as a [`SearchError`].
///
/// # Errors
///
/// - [`SearchError::UpstreamStatus`] for any non-2xx status
/// - [`SearchError::MalformedResponse`] if the body is not a JSON object or
///   `results` is not an array
/// - [`SearchError::UpstreamReported`] if the payload carries a truthy `error`
pub fn try_normalize(status: u16, body: &[u8], query: &str) -> Result<SearchResponse, SearchError> {
    if !(200..300).contains(&status) {
        return Err(SearchError::UpstreamStatus(status));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;
    let payload = match payload {
        Value::Object(map) => map,
        other => {
            return Err(SearchError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    if let Some(error) = payload.get("error").filter(|e| is_truthy(e)) {
        return Err(SearchError::UpstreamReported(value_to_text(error)));
    }

    let results = match payload.get("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().map(map_result).collect(),
        Some(other) => {
            return Err(SearchError::MalformedResponse(format!(
                "`results` must be an array, got {}",
                json_type_name(other)
            )))
        }
    };

    Ok(SearchResponse::new(query, results)
        .with_number_of_results(payload.get("number_of_results").map_or(0, coerce_count))
        .with_suggestions(text_list(&payload, "suggestions"))
        .with_corrections(text_list(&payload, "corrections"))
        .with_answers(answer_list(&payload))
        .with_infoboxes(
            payload
                .get("infoboxes")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        ))
}

/// Map one upstream result entry onto a [`SearchResult`].
///
/// Each field falls back to its [`SearchResult::default`] value when the
/// entry lacks it or holds an unusable type. Non-object entries yield the
/// default result.
pub fn map_result(entry: &Value) -> SearchResult {
    let fallback = SearchResult::default();
    let Value::Object(fields) = entry else {
        tracing::trace!(kind = json_type_name(entry), "non-object result entry defaulted");
        return fallback;
    };

    SearchResult {
        title: text_field(fields, "title").unwrap_or(fallback.title),
        url: text_field(fields, "url").unwrap_or(fallback.url),
        content: text_field(fields, "content").unwrap_or(fallback.content),
        engine: text_field(fields, "engine").unwrap_or(fallback.engine),
        score: fields.get("score").and_then(coerce_score).unwrap_or(fallback.score),
        category: text_field(fields, "category").unwrap_or(fallback.category),
        image_source: optional_link(fields, "img_src"),
        thumbnail_source: optional_link(fields, "thumbnail_src"),
        thumbnail: optional_link(fields, "thumbnail"),
    }
}

/// Read a scalar field as text. Strings pass through; numbers and booleans
/// are stringified; anything else counts as absent.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Read an optional URL field; empty strings count as absent.
fn optional_link(fields: &Map<String, Value>, key: &str) -> Option<String> {
    text_field(fields, key).filter(|s| !s.is_empty())
}

/// Best-effort relevance score. Negative and non-finite values are rejected.
fn coerce_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (score.is_finite() && score >= 0.0).then_some(score)
}

/// Best-effort non-negative count. Floats are truncated, negatives clamp to
/// zero, and anything unparseable counts as zero.
fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(float_to_count))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(float_to_count))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn float_to_count(f: f64) -> u64 {
    // `as` saturates, so large estimates stay large and negatives become 0.
    f.max(0.0) as u64
}

/// Read a list of strings, coercing non-string entries to text.
fn text_list(payload: &Map<String, Value>, key: &str) -> Vec<String> {
    match payload.get(key) {
        Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        _ => Vec::new(),
    }
}

/// Read direct answers. Object entries contribute their `answer` field when
/// present; every other entry is coerced to text.
fn answer_list(payload: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Array(items)) = payload.get("answers") else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) => fields
                .get("answer")
                .map_or_else(|| value_to_text(item), value_to_text),
            other => value_to_text(other),
        })
        .collect()
}

/// Render any JSON value as display text. Strings are not re-quoted.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether an `error` value signals a failure: null, false, zero and empty
/// strings, arrays and objects do not.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
