//! Per-subject source retrieval.
//!
//! # Responsibility
//! - Describe where each subject's record lives (`SourceSpec`).
//! - Retrieve and parse one record per `SourceSpec` through a substitutable fetcher.
//! - Classify retrieval failures into a small error taxonomy.
//!
//! # Invariants
//! - A fetch either yields a well-formed flat string map or a `SourceError`.
//! - An empty record is a valid record, not an error.

use crate::model::term::Subject;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod fetch;
pub mod record;

pub use fetch::{DefaultFetcher, SourceFetcher};
pub use record::{RecordFormatError, SourceRecord};

/// Result type for source retrieval.
pub type SourceResult<T> = Result<T, SourceError>;

/// Where one subject's record is retrieved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Http(String),
}

impl SourceLocation {
    /// Parses a location string; `http://` and `https://` select HTTP.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

/// One `(subject, location)` pair handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub subject: Subject,
    pub location: SourceLocation,
}

impl SourceSpec {
    pub fn new(subject: Subject, location: SourceLocation) -> Self {
        Self { subject, location }
    }

    /// Builds a file-backed spec.
    pub fn file(subject: Subject, path: impl Into<PathBuf>) -> Self {
        Self::new(subject, SourceLocation::File(path.into()))
    }
}

/// Per-source retrieval failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// IO/network failure or non-success status.
    Unavailable {
        subject: Subject,
        location: String,
        detail: String,
    },
    /// Content is not a flat string-to-string JSON object.
    Malformed {
        subject: Subject,
        location: String,
        detail: String,
    },
    /// Retrieval did not settle within the configured timeout.
    TimedOut {
        subject: Subject,
        location: String,
        timeout_ms: u128,
    },
}

impl SourceError {
    pub fn unavailable(spec: &SourceSpec, detail: impl Into<String>) -> Self {
        Self::Unavailable {
            subject: spec.subject,
            location: spec.location.to_string(),
            detail: detail.into(),
        }
    }

    pub fn malformed(spec: &SourceSpec, detail: impl Into<String>) -> Self {
        Self::Malformed {
            subject: spec.subject,
            location: spec.location.to_string(),
            detail: detail.into(),
        }
    }

    pub fn timed_out(spec: &SourceSpec, timeout_ms: u128) -> Self {
        Self::TimedOut {
            subject: spec.subject,
            location: spec.location.to_string(),
            timeout_ms,
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            Self::Unavailable { subject, .. }
            | Self::Malformed { subject, .. }
            | Self::TimedOut { subject, .. } => *subject,
        }
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "source_unavailable",
            Self::Malformed { .. } => "source_malformed",
            Self::TimedOut { .. } => "source_timeout",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable {
                subject,
                location,
                detail,
            } => write!(f, "Failed to load {subject} terms from {location}. {detail}"),
            Self::Malformed {
                subject,
                location,
                detail,
            } => write!(f, "Failed to parse {subject} terms from {location}: {detail}"),
            Self::TimedOut {
                subject,
                location,
                timeout_ms,
            } => write!(
                f,
                "Timed out loading {subject} terms from {location} after {timeout_ms} ms"
            ),
        }
    }
}

impl Error for SourceError {}

#[cfg(test)]
mod tests {
    use super::{SourceError, SourceLocation, SourceSpec};
    use crate::model::term::Subject;
    use std::path::PathBuf;

    #[test]
    fn location_parse_detects_http() {
        assert_eq!(
            SourceLocation::parse(" https://example.com/data/physics.json "),
            SourceLocation::Http("https://example.com/data/physics.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse("data/biology.json"),
            SourceLocation::File(PathBuf::from("data/biology.json"))
        );
    }

    #[test]
    fn unavailable_message_names_subject_and_location() {
        let spec = SourceSpec::file(Subject::Physics, "/data/physics.json");
        let err = SourceError::unavailable(&spec, "Status: 404");
        assert_eq!(
            err.to_string(),
            "Failed to load Physics terms from /data/physics.json. Status: 404"
        );
        assert_eq!(err.code(), "source_unavailable");
        assert_eq!(err.subject(), Subject::Physics);
    }
}
