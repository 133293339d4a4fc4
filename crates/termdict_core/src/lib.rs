//! Core domain logic for the term dictionary.
//! Loading, filtering and session state live here; UI shells only render.

pub mod filter;
pub mod loader;
pub mod logging;
pub mod model;
pub mod session;
pub mod source;

pub use filter::{filter_terms, FilterQuery};
pub use loader::{
    FailurePolicy, LoadOutcome, LoadStatus, LoaderConfig, LoaderConfigError, TermLoader,
    DEFAULT_SOURCE_TIMEOUT, NO_TERMS_NOTICE,
};
pub use logging::{default_log_level, init_logging, logging_status, start_logging, LoggingConfig};
pub use model::term::{Subject, SubjectParseError, Term, TermId, TermValidationError};
pub use session::{DictionarySession, DisplayState, SessionError, SessionView};
pub use source::{
    DefaultFetcher, RecordFormatError, SourceError, SourceFetcher, SourceLocation, SourceRecord,
    SourceResult, SourceSpec,
};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
