//! Error types for the task API client and the user-facing message extractor.
//!
//! # Design
//! `Http` carries the raw status, canonical status text, and response body so
//! callers can distinguish "the resource does not exist" (404) from any other
//! unexpected status, and so `extract_error_message` can dig a structured
//! message out of the body. Transport problems split into `Timeout` and
//! `Network` following how reqwest classifies them.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the HTTP wrapper and the task API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client configuration was rejected (bad header, builder failure).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request failed before a response arrived (connect, DNS, I/O).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        status_text: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest transport failure.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Structured error body shapes commonly returned by REST backends.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
    errors: Option<Vec<String>>,
}

/// Pull a human-readable message out of a structured JSON error body.
///
/// Precedence: `message`, then `error`, then `detail`, then a non-empty
/// `errors` array joined with `", "`.
fn payload_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    if let Some(message) = payload.message {
        return Some(message);
    }
    if let Some(error) = payload.error {
        return Some(error);
    }
    if let Some(detail) = payload.detail {
        return Some(detail);
    }
    match payload.errors {
        Some(errors) if !errors.is_empty() => Some(errors.join(", ")),
        _ => None,
    }
}

/// Map any failure (or the absence of one) to a human-readable message.
///
/// Total over its input; this never fails. Precedence:
/// 1. `None` becomes `"unknown error"`.
/// 2. An HTTP error with a structured JSON body uses the body's `message`,
///    `error`, `detail`, or joined `errors` fields, in that order.
/// 3. An HTTP error without a usable body formats as `"<status>: <text>"`
///    when status text is known.
/// 4. Any other failure uses its own display message.
/// 5. Everything else falls back to `"failed to process request"`.
pub fn extract_error_message(error: Option<&ApiError>) -> String {
    let Some(error) = error else {
        return "unknown error".to_string();
    };
    if let ApiError::Http {
        status,
        status_text,
        body,
    } = error
    {
        if let Some(message) = payload_message(body) {
            return message;
        }
        if let Some(text) = status_text.as_deref().filter(|t| !t.is_empty()) {
            return format!("{status}: {text}");
        }
        return "failed to process request".to_string();
    }
    error.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, status_text: Option<&str>, body: &str) -> ApiError {
        ApiError::Http {
            status,
            status_text: status_text.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn message_field_wins_over_everything_else() {
        let err = http(
            400,
            Some("Bad Request"),
            r#"{"message":"name is required","error":"other","detail":"ignored","errors":["a"]}"#,
        );
        assert_eq!(extract_error_message(Some(&err)), "name is required");
    }

    #[test]
    fn error_field_used_when_message_absent() {
        let err = http(400, Some("Bad Request"), r#"{"error":"bad input"}"#);
        assert_eq!(extract_error_message(Some(&err)), "bad input");
    }

    #[test]
    fn detail_field_used_when_message_and_error_absent() {
        let err = http(400, None, r#"{"detail":"constraint violated"}"#);
        assert_eq!(extract_error_message(Some(&err)), "constraint violated");
    }

    #[test]
    fn errors_array_joined_with_comma_space() {
        let err = http(400, Some("Bad Request"), r#"{"errors":["a","b"]}"#);
        assert_eq!(extract_error_message(Some(&err)), "a, b");
    }

    #[test]
    fn empty_errors_array_falls_back_to_status_line() {
        let err = http(503, Some("Service Unavailable"), r#"{"errors":[]}"#);
        assert_eq!(extract_error_message(Some(&err)), "503: Service Unavailable");
    }

    #[test]
    fn status_line_used_when_body_is_not_json() {
        let err = http(503, Some("Service Unavailable"), "<html>oops</html>");
        assert_eq!(extract_error_message(Some(&err)), "503: Service Unavailable");
    }

    #[test]
    fn generic_failure_uses_its_own_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(
            extract_error_message(Some(&err)),
            "network error: connection refused"
        );
    }

    #[test]
    fn absent_error_maps_to_unknown() {
        assert_eq!(extract_error_message(None), "unknown error");
    }

    #[test]
    fn http_error_with_nothing_usable_hits_the_fallback() {
        let err = http(599, None, "");
        assert_eq!(extract_error_message(Some(&err)), "failed to process request");
    }

    #[test]
    fn null_message_does_not_count_as_structured() {
        let err = http(500, Some("Internal Server Error"), r#"{"message":null}"#);
        assert_eq!(
            extract_error_message(Some(&err)),
            "500: Internal Server Error"
        );
    }
}
