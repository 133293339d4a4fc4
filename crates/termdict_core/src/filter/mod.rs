//! Filter Engine: subject + free-text narrowing of loaded terms.
//!
//! # Responsibility
//! - Compute the displayed subset from the full list and two user inputs.
//!
//! # Invariants
//! - Pure: the same inputs always produce the same output, in input order.
//! - A blank (whitespace-only) search applies no text filter.
//! - Text matching is case-insensitive substring containment on the label
//!   or the definition; there is no ranking.

use crate::model::term::{Subject, Term};

/// User-controlled filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// `None` means all subjects.
    pub subject: Option<Subject>,
    /// Raw search text as typed, possibly with surrounding whitespace.
    pub search_text: String,
}

impl FilterQuery {
    pub fn new(subject: Option<Subject>, search_text: impl Into<String>) -> Self {
        Self {
            subject,
            search_text: search_text.into(),
        }
    }

    /// Trimmed, lower-cased search needle; `None` when blank.
    pub fn normalized_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

/// Returns the terms matching `query`, preserving the order of `all_terms`.
pub fn filter_terms(all_terms: &[Term], query: &FilterQuery) -> Vec<Term> {
    let needle = query.normalized_needle();
    all_terms
        .iter()
        .filter(|term| query.subject.map_or(true, |subject| term.subject == subject))
        .filter(|term| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_text(term, needle))
        })
        .cloned()
        .collect()
}

fn matches_text(term: &Term, needle: &str) -> bool {
    term.term.to_lowercase().contains(needle) || term.definition.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_terms, FilterQuery};
    use crate::model::term::{Subject, Term};

    fn sample() -> Vec<Term> {
        vec![
            Term::new(Subject::Physics, "Force", "A push or pull on an object").unwrap(),
            Term::new(
                Subject::Mathematics,
                "Vector",
                "Quantity with magnitude and direction",
            )
            .unwrap(),
            Term::new(Subject::Physics, "Velocity", "Rate of change of position").unwrap(),
            Term::new(
                Subject::Biology,
                "Enzyme",
                "Protein that speeds up reactions; a biological force",
            )
            .unwrap(),
        ]
    }

    #[test]
    fn unfiltered_query_is_identity() {
        let terms = sample();
        let query = FilterQuery::default();
        assert_eq!(query.normalized_needle(), None);
        assert_eq!(filter_terms(&terms, &query), terms);
    }

    #[test]
    fn subject_filter_keeps_order() {
        let terms = sample();
        let result = filter_terms(&terms, &FilterQuery::new(Some(Subject::Physics), ""));
        let labels: Vec<_> = result.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(labels, vec!["Force", "Velocity"]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let terms = sample();
        let padded = filter_terms(&terms, &FilterQuery::new(None, "  Force  "));
        let plain = filter_terms(&terms, &FilterQuery::new(None, "force"));
        assert_eq!(padded, plain);
        assert_eq!(padded.len(), 2);
    }

    #[test]
    fn search_matches_definition_only_hits() {
        let terms = sample();
        let result = filter_terms(&terms, &FilterQuery::new(None, "MAGNITUDE"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].term, "Vector");
    }

    #[test]
    fn whitespace_search_applies_no_text_filter() {
        let terms = sample();
        let query = FilterQuery::new(Some(Subject::Biology), " \t ");
        assert_eq!(query.normalized_needle(), None);
        assert_eq!(filter_terms(&terms, &query).len(), 1);
    }

    #[test]
    fn filters_intersect() {
        let terms = sample();
        let result = filter_terms(&terms, &FilterQuery::new(Some(Subject::Biology), "force"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].term, "Enzyme");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_terms(&[], &FilterQuery::new(Some(Subject::Physics), "x")).is_empty());
    }

    #[test]
    fn recomputation_is_deterministic() {
        let terms = sample();
        let query = FilterQuery::new(None, "of");
        let first = filter_terms(&terms, &query);
        let second = filter_terms(&terms, &query);
        assert_eq!(first, second);
        let first_ids: Vec<_> = first.iter().map(|t| t.id).collect();
        let second_ids: Vec<_> = second.iter().map(|t| t.id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
