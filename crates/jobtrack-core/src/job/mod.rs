//! Job application domain module.
//!
//! # Module Structure
//!
//! - `model`: `JobRecord`, `JobId` and the write forms (`JobDraft`, `JobPatch`, `NotesUpdate`)
//! - `status`: `JobStatus` and its presentation
//! - `date`: lenient parsing of wire dates

mod date;
mod model;
mod status;

// Re-export public API
pub use date::parse_wire_date;
pub use model::{JobDraft, JobId, JobPatch, JobRecord, NotesUpdate};
pub use status::JobStatus;
