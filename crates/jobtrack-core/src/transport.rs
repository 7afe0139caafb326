//! Raw transport failures as reported by the remote-service adapter.

use serde_json::Value;
use thiserror::Error;

/// A failure observed at the network boundary, before any classification.
///
/// `status` is `None` when no HTTP response was received at all (connection
/// refused, DNS failure, timeout). `payload` holds the response body: parsed
/// JSON when the body was JSON, a JSON string otherwise.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status code, if a response arrived.
    pub status: Option<u16>,
    /// Response body, if one arrived and was non-empty.
    pub payload: Option<Value>,
    /// Technical message from the transport layer.
    pub message: String,
}

impl TransportError {
    /// Creates an error for a non-success HTTP response.
    pub fn http(status: u16, payload: Option<Value>) -> Self {
        Self {
            status: Some(status),
            payload,
            message: format!("Request failed with status code {}", status),
        }
    }

    /// Creates an error for a failure with no response (connectivity, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            payload: None,
            message: message.into(),
        }
    }

    /// Overrides the technical message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns true if the failure has the given HTTP status.
    pub fn has_status(&self, status: u16) -> bool {
        self.status == Some(status)
    }

    /// Returns true if no response was received.
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }
}

/// Turns a raw response body into a payload value.
///
/// JSON bodies are parsed; anything else is kept as a JSON string. Empty
/// bodies yield `None`.
pub fn payload_from_body(body: &str) -> Option<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_from_body() {
        assert_eq!(payload_from_body(""), None);
        assert_eq!(payload_from_body("  \n"), None);
        assert_eq!(
            payload_from_body("Invalid credentials"),
            Some(Value::String("Invalid credentials".into()))
        );
        assert_eq!(
            payload_from_body(r#"{"error":"User already exists"}"#),
            Some(json!({"error": "User already exists"}))
        );
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = TransportError::network("connection refused");
        assert!(err.is_network());
        assert!(!err.has_status(401));
        assert_eq!(err.to_string(), "connection refused");
    }
}
