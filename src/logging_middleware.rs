// src/logging_middleware.rs
//! Middleware for logging request and response bodies at debug level

use axum::body::{to_bytes, Body, Bytes};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Log JSON request and response bodies of at most `limit` bytes each.
///
/// Bodies are buffered to be logged and then handed on unchanged. Larger
/// bodies pass through without being logged.
pub async fn log_bodies(
    State(limit): State<usize>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if bytes.len() <= limit {
        if let Some(rendered) = render_body(&bytes) {
            debug!(method = %parts.method, uri = %parts.uri, request_body = %rendered, "Request");
        }
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if bytes.len() <= limit {
        if let Some(rendered) = render_body(&bytes) {
            debug!(status = %parts.status, response_body = %rendered, "Response");
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Pretty JSON when the body parses, raw UTF-8 otherwise, nothing if empty
fn render_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    let rendered = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| text.to_string());
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_body_pretty_prints_json() {
        let rendered = render_body(&Bytes::from_static(br#"{"name":"Robin"}"#)).unwrap();
        assert_eq!(rendered, "{\n  \"name\": \"Robin\"\n}");
    }

    #[test]
    fn test_render_body_skips_empty_and_keeps_text() {
        assert!(render_body(&Bytes::new()).is_none());
        assert_eq!(
            render_body(&Bytes::from_static(b"plain")).unwrap(),
            "plain"
        );
    }
}
