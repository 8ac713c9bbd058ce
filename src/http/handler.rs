use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::queue::QueueRegistry;

/// Deepest array/object nesting accepted in a published message.
pub const MAX_NESTING_DEPTH: usize = 512;

/// The queue name captured from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueName(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for QueueName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidQueueName(rejection.body_text()))?;
        Ok(QueueName(name))
    }
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub status: &'static str,
    pub queued: usize,
}

/// POST /publish/{queue}
///
/// The body must be a JSON object; the request's content type is ignored.
pub async fn publish(
    State(registry): State<Arc<QueueRegistry>>,
    QueueName(queue): QueueName,
    body: Bytes,
) -> Result<Json<PublishResponse>, ApiError> {
    let payload = parse_message(&body).map_err(|err| {
        tracing::warn!(queue = %queue, "rejected publish: {}", err);
        ApiError::InvalidJson
    })?;

    let queued = registry.publish(&queue, payload);

    Ok(Json(PublishResponse {
        status: "ok",
        queued,
    }))
}

/// GET|POST /consume/{queue}
///
/// Responds with the oldest payload verbatim, or `{"status":"empty"}`.
pub async fn consume(
    State(registry): State<Arc<QueueRegistry>>,
    QueueName(queue): QueueName,
) -> Json<Value> {
    match registry.consume(&queue) {
        Some(message) => Json(message.into_payload()),
        None => Json(serde_json::json!({ "status": "empty" })),
    }
}

/// HEAD /consume/{queue}
///
/// Refused: a consume answered without a body would drop the message.
pub async fn refuse_head() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, POST")])
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

fn parse_message(body: &[u8]) -> Result<Value, String> {
    if nesting_exceeds(body, MAX_NESTING_DEPTH) {
        return Err(format!("nested deeper than {} levels", MAX_NESTING_DEPTH));
    }

    // Depth is bounded above, so serde_json's own 128-level limit is lifted.
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer).map_err(|err| err.to_string())?;
    deserializer.end().map_err(|err| err.to_string())?;

    match value {
        Value::Object(_) => Ok(value),
        other => Err(format!("expected a JSON object, got {}", kind_of(&other))),
    }
}

/// Whether arrays and objects in `body` nest more than `limit` levels.
/// Brackets inside string literals are skipped; malformed input is left to the parser.
fn nesting_exceeds(body: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in body {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    false
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_accepts_objects_only() {
        assert!(parse_message(br#"{"x":1}"#).is_ok());
        assert!(parse_message(br#"{}"#).is_ok());
        assert!(parse_message(b"[1,2]").unwrap_err().contains("an array"));
        assert!(parse_message(b"42").unwrap_err().contains("a number"));
        assert!(parse_message(b"null").is_err());
        assert!(parse_message(b"{not json").is_err());
        assert!(parse_message(b"").is_err());
        assert!(parse_message(br#"{"x":1} trailing"#).is_err());
    }

    #[test]
    fn parse_message_accepts_nesting_past_serde_default() {
        let depth = 200;
        let body = format!("{{\"a\":{}1{}}}", "[".repeat(depth), "]".repeat(depth));

        let value = parse_message(body.as_bytes()).unwrap();

        let mut cursor = &value["a"];
        for _ in 0..depth {
            cursor = &cursor[0];
        }
        assert_eq!(cursor, &Value::from(1));
    }

    #[test]
    fn nesting_limit_enforced() {
        let at_limit = format!("{}{}", "[".repeat(MAX_NESTING_DEPTH), "]".repeat(MAX_NESTING_DEPTH));
        assert!(!nesting_exceeds(at_limit.as_bytes(), MAX_NESTING_DEPTH));

        let body = format!("{{\"a\":{}{}}}", "[".repeat(MAX_NESTING_DEPTH), "]".repeat(MAX_NESTING_DEPTH));
        assert!(parse_message(body.as_bytes()).unwrap_err().contains("nested deeper"));
    }

    #[test]
    fn brackets_inside_strings_do_not_count() {
        let body = format!(r#"{{"text":"{}\"{}"}}"#, "[".repeat(2000), "{".repeat(2000));

        assert!(!nesting_exceeds(body.as_bytes(), 4));
        assert!(parse_message(body.as_bytes()).is_ok());
    }
}
