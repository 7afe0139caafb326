//! Application layer for the Jobtrack client.
//!
//! Wires the domain pieces from `jobtrack-core` to a remote service:
//!
//! - [`SessionStore`]: probe, login, register and logout
//! - [`RecordStore`]: the local copy of the authoritative record set and its mutations
//! - [`Dashboard`]: view choices plus the derived list, analytics, timeline and export
//! - [`intent`]: delete confirmation, notes editor and export options
//!
//! Both stores are constructed once and shared as `Arc`. They hold their
//! state behind `tokio::sync::RwLock` and take their collaborators as
//! `Arc<dyn ...>`.

pub mod dashboard;
pub mod intent;
pub mod navigator;
pub mod record_store;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use dashboard::{Dashboard, DashboardSnapshot};
pub use intent::{ConfirmedDelete, DeleteConfirmation, ExportRequest, ExportScope, NotesEditing};
pub use navigator::{Navigator, Route};
pub use record_store::{ListState, RecordStore, WriteConsistency, WriteOperation};
pub use session_store::SessionStore;
