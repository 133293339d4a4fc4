//! Term and subject domain model.
//!
//! # Responsibility
//! - Define the subject enumeration shared by loader, filter and UI.
//! - Define the term record rendered as one dictionary card.
//!
//! # Invariants
//! - `Subject` is a closed set; parsing unknown text fails instead of
//!   widening the set.
//! - `Term::term` is never blank.
//! - `id` is freshly generated per construction and stable afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier for one loaded term.
///
/// Only stable for the lifetime of a single load; reloading regenerates it.
pub type TermId = Uuid;

/// Knowledge area a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Mathematics,
    Biology,
}

impl Subject {
    /// All subjects in display order.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Mathematics, Subject::Biology];

    /// Human-facing label, also the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Physics => "Physics",
            Self::Mathematics => "Mathematics",
            Self::Biology => "Biology",
        }
    }

    /// Short stable key, accepted by [`Subject::from_str`] as an alias.
    pub fn key(self) -> &'static str {
        match self {
            Self::Physics => "phy",
            Self::Mathematics => "math",
            Self::Biology => "bio",
        }
    }

    /// File name of the subject's source inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Physics => "physics.json",
            Self::Mathematics => "mathematics.json",
            Self::Biology => "biology.json",
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected subject text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectParseError(pub String);

impl Display for SubjectParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown subject `{}`; expected physics|mathematics|biology",
            self.0
        )
    }
}

impl Error for SubjectParseError {}

impl FromStr for Subject {
    type Err = SubjectParseError;

    /// Accepts labels and short keys, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Subject::ALL
            .into_iter()
            .find(|subject| {
                normalized == subject.key() || normalized == subject.label().to_ascii_lowercase()
            })
            .ok_or_else(|| SubjectParseError(value.trim().to_string()))
    }
}

/// Construction errors for [`Term`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermValidationError {
    /// Label is empty after trimming.
    EmptyLabel,
}

impl Display for TermValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "term label cannot be empty"),
        }
    }
}

impl Error for TermValidationError {}

/// One dictionary entry.
///
/// Deserialization runs the same label check as [`Term::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TermWire")]
pub struct Term {
    pub id: TermId,
    pub subject: Subject,
    /// Display label, e.g. `Velocity`.
    pub term: String,
    pub definition: String,
}

impl Term {
    /// Creates a term with a freshly generated ID.
    ///
    /// The label is stored as given; only blank labels are rejected.
    pub fn new(
        subject: Subject,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<Self, TermValidationError> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(TermValidationError::EmptyLabel);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            subject,
            term,
            definition: definition.into(),
        })
    }
}

/// Unvalidated wire shape of [`Term`].
#[derive(Deserialize)]
struct TermWire {
    id: TermId,
    subject: Subject,
    term: String,
    definition: String,
}

impl TryFrom<TermWire> for Term {
    type Error = TermValidationError;

    fn try_from(wire: TermWire) -> Result<Self, Self::Error> {
        if wire.term.trim().is_empty() {
            return Err(TermValidationError::EmptyLabel);
        }
        Ok(Self {
            id: wire.id,
            subject: wire.subject,
            term: wire.term,
            definition: wire.definition,
        })
    }
}
