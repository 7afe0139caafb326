//! Credential forms submitted to `/login` and `/register`.

use crate::error::{Result, TrackerError};
use serde::Serialize;
use std::fmt;

/// Login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Rejects forms that must not be sent.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(TrackerError::validation("Username is required"));
        }
        if self.password.is_empty() {
            return Err(TrackerError::validation("Password is required"));
        }
        Ok(())
    }
}

/// Registration form.
///
/// `confirm_password` is checked locally and never sent.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
        }
    }

    /// Sets a confirmation value different from the password.
    pub fn with_confirmation(mut self, confirm_password: impl Into<String>) -> Self {
        self.confirm_password = confirm_password.into();
        self
    }

    /// The login form that follows a successful registration.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Rejects forms that must not be sent.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(TrackerError::validation("Username is required"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(TrackerError::validation("Email is required"));
        }
        if !email.contains('@') {
            return Err(TrackerError::validation("Email address is not valid"));
        }
        if self.password.is_empty() {
            return Err(TrackerError::validation("Password is required"));
        }
        if self.password != self.confirm_password {
            return Err(TrackerError::validation("Passwords do not match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("al", "secret").validate().is_ok());
        assert!(Credentials::new("  ", "secret").validate().is_err());
        assert!(Credentials::new("al", "").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("al", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        let rendered = format!("{:?}", Registration::new("al", "al@example.com", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_registration_validation() {
        assert!(Registration::new("al", "al@example.com", "pw").validate().is_ok());

        let mismatch = Registration::new("al", "al@example.com", "pw").with_confirmation("pw2");
        match mismatch.validate() {
            Err(TrackerError::Validation(message)) => assert_eq!(message, "Passwords do not match"),
            other => panic!("unexpected: {:?}", other),
        }

        assert!(Registration::new("al", "not-an-email", "pw").validate().is_err());
        assert!(Registration::new("al", "al@example.com", "").validate().is_err());
    }

    #[test]
    fn test_registration_body_omits_confirmation() {
        let body = serde_json::to_value(Registration::new("al", "al@example.com", "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"username": "al", "email": "al@example.com", "password": "pw"})
        );
    }
}
