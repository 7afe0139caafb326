//! Error classification: raw transport failures to user-facing messages.
//!
//! Classification runs in two stages:
//!
//! 1. **Context overrides.** A fixed `(context, status)` table maps known
//!    failure paths to fixed human-readable text. Server error text is
//!    inconsistent across these paths, so it is never echoed for them.
//! 2. **Payload inspection.** An ordered list of extractors is tried in
//!    sequence; the first one that yields a non-blank value wins.
//!
//! Both tables are plain data held by [`ErrorClassifier`], so callers can
//! construct a classifier with a different policy without touching control
//! flow.

use crate::error::TrackerError;
use crate::transport::TransportError;
use serde_json::Value;

/// Message shown for a 401 on login.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";
/// Message shown for a 400 on registration.
pub const ACCOUNT_IN_USE: &str = "Email or username already in use";
/// Message shown when nothing in the failure is displayable.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";
/// Message shown when a record operation is attempted without a session.
pub const LOGIN_REQUIRED: &str = "Please log in to continue";

/// The operation during which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    /// Any operation without a dedicated policy.
    General,
    /// `POST /login`
    Login,
    /// `POST /register`
    Register,
}

/// A function that tries to pull a displayable message out of a failure.
pub type MessageExtractor = fn(&TransportError) -> Option<String>;

/// A fixed message for a status code within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOverride {
    pub context: ErrorContext,
    pub status: u16,
    pub message: &'static str,
}

/// Default context overrides.
pub const CONTEXT_OVERRIDES: &[ContextOverride] = &[
    ContextOverride {
        context: ErrorContext::Login,
        status: 401,
        message: INCORRECT_CREDENTIALS,
    },
    ContextOverride {
        context: ErrorContext::Register,
        status: 400,
        message: ACCOUNT_IN_USE,
    },
];

/// Default extractor chain, most specific first.
pub const MESSAGE_EXTRACTORS: &[MessageExtractor] = &[
    nested_message,
    nested_error,
    raw_payload,
    transport_message,
];

/// Turns failures into stable, displayable strings. Never panics.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    overrides: Vec<ContextOverride>,
    extractors: Vec<MessageExtractor>,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(CONTEXT_OVERRIDES.to_vec(), MESSAGE_EXTRACTORS.to_vec())
    }
}

impl ErrorClassifier {
    /// Creates a classifier from explicit policy tables.
    pub fn new(overrides: Vec<ContextOverride>, extractors: Vec<MessageExtractor>) -> Self {
        Self {
            overrides,
            extractors,
        }
    }

    /// Classifies a transport failure observed in `context`.
    pub fn classify(&self, err: &TransportError, context: ErrorContext) -> String {
        if let Some(status) = err.status
            && let Some(rule) = self
                .overrides
                .iter()
                .find(|rule| rule.context == context && rule.status == status)
        {
            return rule.message.to_string();
        }

        self.extractors
            .iter()
            .find_map(|extract| extract(err))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }

    /// Classifies any client error.
    ///
    /// Transport failures go through [`classify`](Self::classify); locally
    /// detected errors already carry display text.
    pub fn classify_error(&self, err: &TrackerError, context: ErrorContext) -> String {
        match err {
            TrackerError::Transport(transport) => self.classify(transport, context),
            TrackerError::Validation(message) | TrackerError::NoTarget(message) => message.clone(),
            TrackerError::Unauthenticated => LOGIN_REQUIRED.to_string(),
            other => other.to_string(),
        }
    }
}

/// Classifies with the default policy.
pub fn classify(err: &TransportError, context: ErrorContext) -> String {
    ErrorClassifier::default().classify(err, context)
}

// ============================================================================
// Extractors
// ============================================================================

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn displayable(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => non_blank(text),
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn payload_field(err: &TransportError, field: &str) -> Option<String> {
    err.payload
        .as_ref()
        .and_then(|payload| payload.get(field))
        .and_then(displayable)
}

/// `payload.message`
pub fn nested_message(err: &TransportError) -> Option<String> {
    payload_field(err, "message")
}

/// `payload.error`
pub fn nested_error(err: &TransportError) -> Option<String> {
    payload_field(err, "error")
}

/// The payload itself, rendered as text.
pub fn raw_payload(err: &TransportError) -> Option<String> {
    err.payload.as_ref().and_then(displayable)
}

/// The transport layer's own message.
pub fn transport_message(err: &TransportError) -> Option<String> {
    non_blank(&err.message)
}
