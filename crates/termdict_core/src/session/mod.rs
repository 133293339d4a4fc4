//! Dictionary session: state behind the presentation boundary.
//!
//! # Responsibility
//! - Own the load status, the loaded terms and the two filter inputs.
//! - Recompute the displayed subset eagerly after every input change.
//! - Classify the current view into one display branch.
//!
//! # Invariants
//! - Load status moves `NotStarted -> Loading -> terminal` exactly once.
//! - The displayed list is always `filter_terms(all, query)` once loaded,
//!   and empty before that.
//! - Setters never fail; only status transitions can.

use crate::filter::{filter_terms, FilterQuery};
use crate::loader::{LoadOutcome, LoadStatus};
use crate::model::term::{Subject, Term};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid load status transition `{from}` -> `{to}`")
            }
        }
    }
}

impl Error for SessionError {}

/// Which branch the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Error(String),
    /// Load succeeded but no data exists at all.
    NoTermsAvailable,
    /// Data exists but the current filter excludes all of it.
    NoMatches,
    Results(usize),
}

impl DisplayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::NoTermsAvailable => "no_terms",
            Self::NoMatches => "no_matches",
            Self::Results(_) => "results",
        }
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub is_loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub warnings: Vec<String>,
    pub displayed_terms: Vec<Term>,
    pub total_terms: usize,
    pub selected_subject: Option<Subject>,
    pub search_text: String,
}

impl SessionView {
    pub fn display_state(&self) -> DisplayState {
        if self.is_loading {
            DisplayState::Loading
        } else if let Some(message) = &self.error {
            DisplayState::Error(message.clone())
        } else if self.total_terms == 0 {
            DisplayState::NoTermsAvailable
        } else if self.displayed_terms.is_empty() {
            DisplayState::NoMatches
        } else {
            DisplayState::Results(self.displayed_terms.len())
        }
    }
}

/// In-memory state for one browsing session.
#[derive(Debug, Clone)]
pub struct DictionarySession {
    status: LoadStatus,
    all_terms: Vec<Term>,
    notice: Option<String>,
    warnings: Vec<String>,
    query: FilterQuery,
    displayed: Vec<Term>,
}

impl Default for DictionarySession {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionarySession {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::NotStarted,
            all_terms: Vec::new(),
            notice: None,
            warnings: Vec::new(),
            query: FilterQuery::default(),
            displayed: Vec::new(),
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn all_terms(&self) -> &[Term] {
        &self.all_terms
    }

    pub fn displayed_terms(&self) -> &[Term] {
        &self.displayed
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// Marks the one-time load as in flight.
    pub fn begin_loading(&mut self) -> Result<(), SessionError> {
        if self.status != LoadStatus::NotStarted {
            return Err(self.transition_error("loading"));
        }
        self.status = LoadStatus::Loading;
        debug!("event=session_status module=session status=loading");
        Ok(())
    }

    /// Stores the load outcome and computes the first displayed subset.
    pub fn finish_loading(&mut self, outcome: LoadOutcome) -> Result<(), SessionError> {
        let next = outcome.status();
        if self.status != LoadStatus::Loading {
            return Err(self.transition_error(next.as_str()));
        }

        self.status = next;
        self.all_terms = outcome.terms;
        self.notice = outcome.notice;
        self.warnings = outcome.warnings;
        self.recompute();
        info!(
            "event=session_status module=session status={} terms={}",
            self.status.as_str(),
            self.all_terms.len()
        );
        Ok(())
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.recompute();
    }

    pub fn set_selected_subject(&mut self, subject: Option<Subject>) {
        self.query.subject = subject;
        self.recompute();
    }

    pub fn view(&self) -> SessionView {
        let error = match &self.status {
            LoadStatus::Failed(message) => Some(message.clone()),
            _ => None,
        };
        SessionView {
            is_loading: self.status == LoadStatus::Loading,
            error,
            notice: self.notice.clone(),
            warnings: self.warnings.clone(),
            displayed_terms: self.displayed.clone(),
            total_terms: self.all_terms.len(),
            selected_subject: self.query.subject,
            search_text: self.query.search_text.clone(),
        }
    }

    fn recompute(&mut self) {
        if !self.status.is_terminal() {
            return;
        }
        self.displayed = filter_terms(&self.all_terms, &self.query);
    }

    fn transition_error(&self, to: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.status.as_str(),
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DictionarySession, DisplayState, SessionError};
    use crate::loader::{LoadOutcome, LoadStatus, NO_TERMS_NOTICE};
    use crate::model::term::{Subject, Term};

    fn loaded_outcome() -> LoadOutcome {
        LoadOutcome {
            terms: vec![
                Term::new(Subject::Physics, "Velocity", "Rate of change of position").unwrap(),
                Term::new(Subject::Mathematics, "Integral", "Area under curve").unwrap(),
            ],
            ..LoadOutcome::default()
        }
    }

    #[test]
    fn new_session_is_not_started_and_empty() {
        let session = DictionarySession::new();
        assert_eq!(session.status(), &LoadStatus::NotStarted);
        let view = session.view();
        assert!(!view.is_loading);
        assert!(view.displayed_terms.is_empty());
    }

    #[test]
    fn setters_before_completion_keep_display_empty() {
        let mut session = DictionarySession::new();
        session.begin_loading().unwrap();
        session.set_search_text("area");
        assert_eq!(session.view().display_state(), DisplayState::Loading);
        assert!(session.displayed_terms().is_empty());

        session.finish_loading(loaded_outcome()).unwrap();
        assert_eq!(session.displayed_terms().len(), 1);
        assert_eq!(session.displayed_terms()[0].term, "Integral");
    }

    #[test]
    fn setters_recompute_displayed_terms() {
        let mut session = DictionarySession::new();
        session.begin_loading().unwrap();
        session.finish_loading(loaded_outcome()).unwrap();
        assert_eq!(session.view().display_state(), DisplayState::Results(2));

        session.set_selected_subject(Some(Subject::Biology));
        assert_eq!(session.view().display_state(), DisplayState::NoMatches);

        session.set_selected_subject(None);
        session.set_search_text("xyz-no-match");
        let view = session.view();
        assert!(view.displayed_terms.is_empty());
        assert_eq!(view.total_terms, 2);
        assert_eq!(view.display_state(), DisplayState::NoMatches);

        session.set_search_text("");
        assert_eq!(session.view().displayed_terms.len(), 2);
    }

    #[test]
    fn failed_load_surfaces_error_state() {
        let mut session = DictionarySession::new();
        session.begin_loading().unwrap();
        session
            .finish_loading(LoadOutcome::failed("Failed to load Physics terms"))
            .unwrap();
        let view = session.view();
        assert_eq!(view.error.as_deref(), Some("Failed to load Physics terms"));
        assert_eq!(
            view.display_state(),
            DisplayState::Error("Failed to load Physics terms".to_string())
        );
    }

    #[test]
    fn empty_success_is_distinct_from_error() {
        let mut session = DictionarySession::new();
        session.begin_loading().unwrap();
        session
            .finish_loading(LoadOutcome {
                notice: Some(NO_TERMS_NOTICE.to_string()),
                ..LoadOutcome::default()
            })
            .unwrap();
        let view = session.view();
        assert_eq!(session.status(), &LoadStatus::SucceededEmpty);
        assert_eq!(view.error, None);
        assert_eq!(view.notice.as_deref(), Some(NO_TERMS_NOTICE));
        assert_eq!(view.display_state(), DisplayState::NoTermsAvailable);
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        let mut session = DictionarySession::new();
        assert!(session.finish_loading(loaded_outcome()).is_err());

        session.begin_loading().unwrap();
        assert_eq!(
            session.begin_loading().unwrap_err(),
            SessionError::InvalidTransition {
                from: "loading",
                to: "loading"
            }
        );

        session.finish_loading(loaded_outcome()).unwrap();
        assert!(session.begin_loading().is_err());
        assert!(session.finish_loading(LoadOutcome::failed("late")).is_err());
        assert_eq!(session.status(), &LoadStatus::Succeeded { term_count: 2 });
    }
}
