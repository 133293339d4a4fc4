//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose the dictionary view boundary: one load, two setters, one view.
//! - Keep error semantics simple: human-readable strings only.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The process-wide session loads at most once; later calls never re-fetch.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use termdict_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DictionarySession, DisplayState, LoadOutcome, LoaderConfig, Subject, Term, TermLoader,
};

const DATA_DIR_ENV: &str = "TERMDICT_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";
static SESSION: OnceLock<Mutex<DictionarySession>> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One subject filter tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectItem {
    /// Short stable key (`phy|math|bio`).
    pub key: String,
    pub label: String,
}

/// One dictionary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermItem {
    pub id: String,
    pub subject: String,
    pub term: String,
    pub definition: String,
}

/// View envelope rendered by the UI after every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryViewResponse {
    pub is_loading: bool,
    pub error: Option<String>,
    /// Soft message for a successful load that found nothing.
    pub notice: Option<String>,
    pub warnings: Vec<String>,
    /// Currently displayed terms, in load order.
    pub items: Vec<TermItem>,
    pub total_terms: u32,
    /// Display branch (`loading|error|no_terms|no_matches|results`).
    pub state: String,
    /// Human-readable status line for the current branch.
    pub message: String,
}

/// Lists subject tabs in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn dictionary_subjects() -> Vec<SubjectItem> {
    Subject::ALL
        .into_iter()
        .map(|subject| SubjectItem {
            key: subject.key().to_string(),
            label: subject.label().to_string(),
        })
        .collect()
}

/// Loads all subject files from `data_dir` into the process-wide session.
///
/// Empty `data_dir` falls back to `TERMDICT_DATA_DIR`, then `./data`.
///
/// # FFI contract
/// - Sync call; blocks until every source settles or times out.
/// - Runs at most once per process; later calls return the current view.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn dictionary_load(data_dir: String) -> DictionaryViewResponse {
    load_into(session(), resolve_data_dir(&data_dir))
}

/// Replaces the search text and returns the recomputed view.
#[flutter_rust_bridge::frb(sync)]
pub fn dictionary_set_search_text(text: String) -> DictionaryViewResponse {
    let mut guard = lock(session());
    guard.set_search_text(text);
    view_response(&guard, None)
}

/// Selects a subject by label or key; `None` selects all subjects.
///
/// Unknown subjects leave the view unchanged and explain why in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn dictionary_set_subject(subject: Option<String>) -> DictionaryViewResponse {
    set_subject_in(session(), subject)
}

/// Returns the current view without changing anything.
#[flutter_rust_bridge::frb(sync)]
pub fn dictionary_view() -> DictionaryViewResponse {
    view_response(&lock(session()), None)
}

fn session() -> &'static Mutex<DictionarySession> {
    SESSION.get_or_init(|| Mutex::new(DictionarySession::new()))
}

fn lock(session: &Mutex<DictionarySession>) -> MutexGuard<'_, DictionarySession> {
    session
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn load_into(session: &Mutex<DictionarySession>, data_dir: PathBuf) -> DictionaryViewResponse {
    {
        let mut guard = lock(session);
        if let Err(err) = guard.begin_loading() {
            return view_response(&guard, Some(format!("dictionary_load skipped: {err}")));
        }
    }

    // Lock is released while fetching so concurrent views report `loading`.
    let outcome = run_load(data_dir);

    let mut guard = lock(session);
    if let Err(err) = guard.finish_loading(outcome) {
        warn!("event=dictionary_load module=ffi status=error error={err}");
        return view_response(&guard, Some(format!("dictionary_load failed: {err}")));
    }
    view_response(&guard, None)
}

fn run_load(data_dir: PathBuf) -> LoadOutcome {
    let loader = match TermLoader::with_default_fetcher(LoaderConfig::for_data_dir(&data_dir)) {
        Ok(loader) => loader,
        Err(err) => return LoadOutcome::failed(format!("invalid loader config: {err}")),
    };
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return LoadOutcome::failed(format!("failed to start load runtime: {err}")),
    };
    runtime.block_on(loader.load())
}

fn set_subject_in(
    session: &Mutex<DictionarySession>,
    subject: Option<String>,
) -> DictionaryViewResponse {
    let parsed = match subject.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<Subject>() {
            Ok(subject) => Some(subject),
            Err(err) => {
                return view_response(
                    &lock(session),
                    Some(format!("dictionary_set_subject failed: {err}")),
                );
            }
        },
    };

    let mut guard = lock(session);
    guard.set_selected_subject(parsed);
    view_response(&guard, None)
}

fn resolve_data_dir(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        return PathBuf::from(trimmed);
    }
    if let Ok(from_env) = std::env::var(DATA_DIR_ENV) {
        let from_env = from_env.trim();
        if !from_env.is_empty() {
            return PathBuf::from(from_env);
        }
    }
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn view_response(session: &DictionarySession, message: Option<String>) -> DictionaryViewResponse {
    let view = session.view();
    let state = view.display_state();
    let message = message.unwrap_or_else(|| state_message(&state));
    DictionaryViewResponse {
        is_loading: view.is_loading,
        error: view.error,
        notice: view.notice,
        warnings: view.warnings,
        items: view.displayed_terms.iter().map(to_term_item).collect(),
        total_terms: u32::try_from(view.total_terms).unwrap_or(u32::MAX),
        state: state.as_str().to_string(),
        message,
    }
}

fn state_message(state: &DisplayState) -> String {
    match state {
        DisplayState::Loading => "Loading terms...".to_string(),
        DisplayState::Error(message) => message.clone(),
        DisplayState::NoTermsAvailable => "No terms available.".to_string(),
        DisplayState::NoMatches => "No terms match your current search or filter.".to_string(),
        DisplayState::Results(count) => format!("Showing {count} term(s)."),
    }
}

fn to_term_item(term: &Term) -> TermItem {
    TermItem {
        id: term.id.to_string(),
        subject: term.subject.label().to_string(),
        term: term.term.clone(),
        definition: term.definition.clone(),
    }
}
