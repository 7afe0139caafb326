//! Transient list-view settings.

use crate::job::JobStatus;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Field the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    DateApplied,
    Company,
    Position,
    Status,
}

/// Direction of the list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Search, filter and sort settings of the list view. Never persisted.
///
/// Defaults to newest applications first with no search or filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub status_filter: Option<JobStatus>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ViewState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_status(mut self, status: Option<JobStatus>) -> Self {
        self.status_filter = status;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }

    /// Selects `key`; selecting the current key again flips the direction.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.reversed();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::default();
        }
    }
}
