//! Response handling shared by both backends.
//!
//! Order of checks: transport failure, empty body, markup body, JSON decode.
//! Status handling is left to the caller since only the relay uses 401.

use std::time::Duration;

use reply_core::{ReplyError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Status and body of a completed HTTP exchange.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    body: &B,
    timeout: Duration,
    service: &str,
) -> Result<RawResponse> {
    let response = client
        .post(url)
        .query(query)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout, service))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout, service))?;

    log::debug!(
        "{} response received. HTTP {}, {} bytes",
        service,
        status,
        body.len()
    );

    Ok(RawResponse { status, body })
}

// The request URL can carry the API key as a query parameter, so it is
// stripped before the error is logged.
fn transport_error(error: reqwest::Error, timeout: Duration, service: &str) -> ReplyError {
    let error = error.without_url();
    log::warn!("{} transport error: {}", service, error);
    if error.is_timeout() {
        return ReplyError::Connection(format!(
            "The {} server did not respond within {} seconds. Please try again later.",
            service,
            timeout.as_secs()
        ));
    }
    ReplyError::Connection(format!(
        "Could not connect to the {} server. Please check your internet connection and try again.",
        service
    ))
}

/// Decode a body that must be JSON.
pub(crate) fn decode_body(raw: &RawResponse, service: &str) -> Result<Value> {
    let trimmed = raw.body.trim();

    if trimmed.is_empty() || raw.status == 0 {
        log::warn!("{} returned an empty body (HTTP {})", service, raw.status);
        return Err(ReplyError::Connection(format!(
            "Could not reach the {} server. The server may be temporarily unavailable. Please try again later.",
            service
        )));
    }

    if trimmed.starts_with('<') {
        log::warn!("{} returned markup instead of JSON (HTTP {})", service, raw.status);
        return Err(ReplyError::Connection(format!(
            "Could not connect to the {} server. Please try again later or contact support if the issue persists.",
            service
        )));
    }

    serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(200).collect();
        log::warn!("{} JSON decode error: {}. Body: {}", service, e, preview);
        ReplyError::protocol_with_details(
            format!("Unexpected response from the {} server. Please try again later.", service),
            Some(e.to_string()),
        )
    })
}

/// Pull `(message, details)` out of an error body.
///
/// Handles the relay's `{"error": "...", "details": "..."}` and the
/// provider's `{"error": {"message", "status", "code"}}`.
pub(crate) fn extract_error(body: &Value) -> (Option<String>, Option<String>) {
    match body.get("error") {
        Some(Value::String(message)) => {
            let details = body.get("details").and_then(|details| match details {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            });
            (Some(message.clone()), details)
        }
        Some(Value::Object(error)) => {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            let status = error.get("status").and_then(Value::as_str);
            let code = error.get("code").and_then(Value::as_i64);
            let details = match (status, code) {
                (None, None) => None,
                (status, code) => Some(format!(
                    "status={}, code={}",
                    status.unwrap_or("unknown"),
                    code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string())
                )),
            };
            (message, details)
        }
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn empty_body_is_unreachable_server() {
        let err = decode_body(&raw(200, "  "), "relay").unwrap_err();
        match err {
            ReplyError::Connection(message) => assert!(message.contains("Could not reach")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn markup_body_is_a_connection_error() {
        let err = decode_body(&raw(502, "<!DOCTYPE html><html></html>"), "relay").unwrap_err();
        assert_eq!(err.kind(), "connection_error");
    }

    #[test]
    fn invalid_json_is_a_protocol_error() {
        let err = decode_body(&raw(200, "{\"candidates\":"), "relay").unwrap_err();
        assert_eq!(err.kind(), "protocol_error");
    }

    #[test]
    fn extracts_relay_error_shape() {
        let (message, details) =
            extract_error(&json!({"error": "Quota exceeded", "details": "retry tomorrow"}));
        assert_eq!(message.as_deref(), Some("Quota exceeded"));
        assert_eq!(details.as_deref(), Some("retry tomorrow"));
    }

    #[test]
    fn extracts_provider_error_shape() {
        let (message, details) = extract_error(&json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        }));
        assert_eq!(message.as_deref(), Some("API key not valid"));
        assert_eq!(details.as_deref(), Some("status=INVALID_ARGUMENT, code=400"));
    }

    #[test]
    fn missing_error_field_yields_nothing() {
        assert_eq!(extract_error(&json!({"success": false})), (None, None));
    }
}
