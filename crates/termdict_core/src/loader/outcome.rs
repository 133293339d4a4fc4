//! Aggregate load result and status classification.

use crate::model::term::Term;

/// Notice attached when every source loaded but none contained terms.
pub const NO_TERMS_NOTICE: &str = "No terms found. Please check that the data files (e.g. physics.json) are in place, formatted as JSON objects, and contain data.";

/// Lifecycle of the one-per-session load.
///
/// `Succeeded`, `SucceededEmpty` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotStarted,
    Loading,
    Succeeded { term_count: usize },
    /// Load completed without errors but produced no terms.
    SucceededEmpty,
    Failed(String),
}

impl LoadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::SucceededEmpty | Self::Failed(_)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Loading => "loading",
            Self::Succeeded { .. } => "succeeded",
            Self::SucceededEmpty => "succeeded_empty",
            Self::Failed(_) => "failed",
        }
    }
}

/// Consolidated output of one load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadOutcome {
    /// Config order, then record order. Empty whenever `error` is set.
    pub terms: Vec<Term>,
    /// Single human-readable failure message.
    pub error: Option<String>,
    /// Soft "nothing found" message; never set together with `error`.
    pub notice: Option<String>,
    /// Per-subject failures tolerated under best-effort loading.
    pub warnings: Vec<String>,
}

impl LoadOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn status(&self) -> LoadStatus {
        if let Some(message) = &self.error {
            LoadStatus::Failed(message.clone())
        } else if self.terms.is_empty() {
            LoadStatus::SucceededEmpty
        } else {
            LoadStatus::Succeeded {
                term_count: self.terms.len(),
            }
        }
    }
}
