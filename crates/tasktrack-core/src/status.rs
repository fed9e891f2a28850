//! Collection fetch lifecycle (idle → loading → succeeded/failed).
//!
//! Each collection (todos, groups) carries one of these. Mutations do not
//! change it; only full-collection fetches do.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    /// True if a lazy first load should be issued.
    ///
    /// Only `Idle` qualifies; an explicit refetch can start from any state.
    pub fn can_start_fetch(self) -> bool {
        matches!(self, FetchStatus::Idle)
    }

    pub fn is_loading(self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    /// State after a fetch is dispatched.
    pub fn on_fetch_started(self) -> Self {
        FetchStatus::Loading
    }

    /// State after a fetch resolves.
    pub fn on_fetch_done(self, ok: bool) -> Self {
        if ok {
            FetchStatus::Succeeded
        } else {
            FetchStatus::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Succeeded => "succeeded",
            FetchStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
