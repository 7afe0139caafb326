//! Session domain model.
//!
//! Exactly one [`Session`] exists per running client. It starts
//! `Unauthenticated`, is `Authenticating` while the startup probe runs, and
//! only changes through the transition methods below, which encode the
//! allowed state machine:
//!
//! ```text
//! Unauthenticated ──▶ Authenticating ──▶ Authenticated ──▶ Unauthenticated
//!                         ▲      │
//!                         │      ▼
//!                         └── AuthFailed
//! ```

use crate::serde_helpers::non_blank;
use serde::{Deserialize, Serialize};

/// Authentication status of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    /// No session; the user must log in or register.
    Unauthenticated,
    /// A probe, login or registration request is in flight.
    Authenticating,
    /// The server recognised the session.
    Authenticated,
    /// The last login or registration attempt failed.
    AuthFailed,
}

/// The identity of the logged-in user, as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    /// Creates an identity with only a username.
    pub fn from_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
        }
    }
}

/// Process-wide authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Option<UserIdentity>,
    status: AuthStatus,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            identity: None,
            status: AuthStatus::Unauthenticated,
            last_error: None,
        }
    }
}

impl Session {
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Authenticating
    }

    /// Name used to greet the user: username, else email, else "User".
    pub fn display_name(&self) -> &str {
        match &self.identity {
            Some(identity) if !identity.username.trim().is_empty() => &identity.username,
            Some(UserIdentity {
                email: Some(email), ..
            }) => email,
            _ => "User",
        }
    }

    /// Enters `Authenticating` and clears the previous error.
    pub fn begin_authentication(&mut self) {
        self.status = AuthStatus::Authenticating;
        self.last_error = None;
    }

    /// Enters `Authenticated` with the given identity.
    pub fn authenticate(&mut self, identity: UserIdentity) {
        self.identity = Some(identity);
        self.status = AuthStatus::Authenticated;
        self.last_error = None;
    }

    /// Enters `AuthFailed` with a display message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.identity = None;
        self.status = AuthStatus::AuthFailed;
        self.last_error = Some(message.into());
    }

    /// Records an error without changing status (e.g. a failed logout).
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Clears the current error without changing status.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Drops identity and returns to `Unauthenticated`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
