//! Session domain module.
//!
//! This module contains the authentication state of the running client and
//! the credential forms submitted to the remote service.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `AuthStatus`, `UserIdentity`
//! - `credentials`: `Credentials` and `Registration` with pre-submission validation
//!
//! # Usage
//!
//! ```ignore
//! use jobtrack_core::session::{AuthStatus, Credentials, Registration, Session, UserIdentity};
//! ```

mod credentials;
mod model;

// Re-export public API
pub use credentials::{Credentials, Registration};
pub use model::{AuthStatus, Session, UserIdentity};
