use serde::{Deserialize, Serialize};

use crate::model::SortOrder;

/// Settings shared by a [`crate::TripPresenter`] and the point presenters it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Order the list is considered to be in when first rendered. The points are not re-sorted
    /// on `init`; they are shown in the order the source returns them.
    pub initial_sort: SortOrder,

    /// Key that closes an open editor, discarding its changes.
    pub cancel_key: String,
}

impl PresenterConfig {
    pub fn with_initial_sort(mut self, initial_sort: SortOrder) -> Self {
        self.initial_sort = initial_sort;
        self
    }

    pub fn with_cancel_key<S>(mut self, cancel_key: S) -> Self
    where
        S: Into<String>,
    {
        self.cancel_key = cancel_key.into();
        self
    }
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            initial_sort: SortOrder::Day,
            cancel_key: "Escape".to_string(),
        }
    }
}
