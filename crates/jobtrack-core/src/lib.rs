//! Domain layer for the Jobtrack client.
//!
//! Holds the models, the remote-service contract and every pure piece of the
//! client: error classification, the derived list view, the timeline and the
//! export serializer. Nothing in this crate performs I/O.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod job;
pub mod session;
pub mod timeline;
pub mod transport;
pub mod view;

mod serde_helpers;

// Re-export common types
pub use classifier::{ErrorClassifier, ErrorContext};
pub use error::TrackerError;
pub use transport::TransportError;
