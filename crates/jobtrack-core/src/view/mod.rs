//! Derived views over the authoritative record set.
//!
//! Everything here is a pure function of its inputs: callers recompute the
//! view whenever the records or the [`ViewState`] change, and nothing is
//! cached between calls.
//!
//! # Module Structure
//!
//! - `state`: `ViewState`, `SortKey`, `SortOrder`
//! - `pipeline`: search → status filter → sort
//! - `analytics`: totals, per-status counts and recent activity over the full set

mod analytics;
mod pipeline;
mod state;

// Re-export public API
pub use analytics::{Analytics, RECENT_WINDOW_DAYS, compute_analytics};
pub use pipeline::{compare_records, derive_view, matches_search, matches_status};
pub use state::{SortKey, SortOrder, ViewState};
