//! Loader configuration.

use crate::model::term::Subject;
use crate::source::SourceSpec;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Default upper bound for one source retrieval.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// How per-source failures combine into the aggregate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any failing source fails the whole load with an empty term list.
    #[default]
    AllOrNothing,
    /// Failing sources become warnings; the load fails only when all fail.
    BestEffort,
}

impl FailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllOrNothing => "all_or_nothing",
            Self::BestEffort => "best_effort",
        }
    }
}

/// Rejected loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderConfigError {
    MissingSources,
    DuplicateSubject(Subject),
    ZeroTimeout,
}

impl Display for LoaderConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSources => write!(f, "loader config has no sources"),
            Self::DuplicateSubject(subject) => {
                write!(f, "subject {subject} is configured more than once")
            }
            Self::ZeroTimeout => write!(f, "source timeout must be greater than zero"),
        }
    }
}

impl Error for LoaderConfigError {}

/// Explicit source list and retrieval limits for one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Retrieved concurrently; aggregated in this order.
    pub sources: Vec<SourceSpec>,
    pub source_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl LoaderConfig {
    pub fn new(sources: Vec<SourceSpec>) -> Self {
        Self {
            sources,
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Standard layout: one `<subject>.json` file per subject under `data_dir`.
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self::new(
            Subject::ALL
                .into_iter()
                .map(|subject| {
                    SourceSpec::file(subject, data_dir.join(subject.default_file_name()))
                })
                .collect(),
        )
    }

    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Checks that every subject appears at most once and limits are usable.
    pub fn validate(&self) -> Result<(), LoaderConfigError> {
        if self.sources.is_empty() {
            return Err(LoaderConfigError::MissingSources);
        }
        if self.source_timeout.is_zero() {
            return Err(LoaderConfigError::ZeroTimeout);
        }
        let mut seen = BTreeSet::new();
        for spec in &self.sources {
            if !seen.insert(spec.subject) {
                return Err(LoaderConfigError::DuplicateSubject(spec.subject));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FailurePolicy, LoaderConfig, LoaderConfigError, DEFAULT_SOURCE_TIMEOUT};
    use crate::model::term::Subject;
    use crate::source::{SourceLocation, SourceSpec};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn for_data_dir_builds_one_file_per_subject() {
        let config = LoaderConfig::for_data_dir("/srv/dict");
        assert_eq!(config.source_timeout, DEFAULT_SOURCE_TIMEOUT);
        assert_eq!(config.failure_policy, FailurePolicy::AllOrNothing);
        assert_eq!(
            config.sources,
            vec![
                SourceSpec::file(Subject::Physics, "/srv/dict/physics.json"),
                SourceSpec::file(Subject::Mathematics, "/srv/dict/mathematics.json"),
                SourceSpec::file(Subject::Biology, "/srv/dict/biology.json"),
            ]
        );
        assert_eq!(
            config.sources[0].location,
            SourceLocation::File(PathBuf::from("/srv/dict/physics.json"))
        );
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_duplicates_and_zero_timeout() {
        let duplicated = LoaderConfig::new(vec![
            SourceSpec::file(Subject::Biology, "a.json"),
            SourceSpec::file(Subject::Biology, "b.json"),
        ]);
        assert_eq!(
            duplicated.validate().unwrap_err(),
            LoaderConfigError::DuplicateSubject(Subject::Biology)
        );

        let zero = LoaderConfig::for_data_dir("data").with_source_timeout(Duration::ZERO);
        assert_eq!(zero.validate().unwrap_err(), LoaderConfigError::ZeroTimeout);

        assert_eq!(
            LoaderConfig::new(Vec::new()).validate().unwrap_err(),
            LoaderConfigError::MissingSources
        );
    }
}
