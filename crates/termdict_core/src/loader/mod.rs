//! Term Loader: one-shot aggregate load of all subject sources.
//!
//! # Responsibility
//! - Retrieve every configured source concurrently and join on all of them.
//! - Normalize each record into `Term` entities tagged with their subject.
//! - Classify the aggregate into success, succeeded-empty or failure.
//!
//! # Invariants
//! - Under `AllOrNothing`, any failing source yields no terms and one error.
//! - `error` and `notice` are never both set.
//! - Term order is config order, then record order, independent of which
//!   retrieval settled first.
//! - A retrieval slower than `source_timeout` is that source's failure.

use crate::model::term::{Subject, Term};
use crate::source::{
    DefaultFetcher, SourceError, SourceFetcher, SourceRecord, SourceResult, SourceSpec,
};
use futures_util::future::join_all;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod config;
pub mod outcome;

pub use config::{FailurePolicy, LoaderConfig, LoaderConfigError, DEFAULT_SOURCE_TIMEOUT};
pub use outcome::{LoadOutcome, LoadStatus, NO_TERMS_NOTICE};

/// Loads all subject sources through a substitutable fetcher.
pub struct TermLoader {
    config: LoaderConfig,
    fetcher: Arc<dyn SourceFetcher>,
}

impl TermLoader {
    /// Creates a loader after validating `config`.
    pub fn try_new(
        config: LoaderConfig,
        fetcher: Arc<dyn SourceFetcher>,
    ) -> Result<Self, LoaderConfigError> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    /// Creates a loader backed by [`DefaultFetcher`].
    pub fn with_default_fetcher(config: LoaderConfig) -> Result<Self, LoaderConfigError> {
        Self::try_new(config, Arc::new(DefaultFetcher::new()))
    }

    /// Runs the aggregate load.
    ///
    /// Never returns `Err`: failures are folded into [`LoadOutcome::error`]
    /// or [`LoadOutcome::warnings`] according to the failure policy.
    pub async fn load(&self) -> LoadOutcome {
        let started_at = Instant::now();
        info!(
            "event=load_start module=loader status=start sources={} policy={} timeout_ms={}",
            self.config.sources.len(),
            self.config.failure_policy.as_str(),
            self.config.source_timeout.as_millis()
        );

        let fetcher = self.fetcher.as_ref();
        let timeout = self.config.source_timeout;
        let settled = join_all(
            self.config
                .sources
                .iter()
                .map(|spec| fetch_with_timeout(fetcher, spec, timeout)),
        )
        .await;

        let mut terms = Vec::new();
        let mut failures = Vec::new();
        for (spec, result) in self.config.sources.iter().zip(settled) {
            match result {
                Ok(record) => terms.extend(record_into_terms(spec.subject, record)),
                Err(err) => failures.push(err),
            }
        }

        let outcome = aggregate(
            self.config.failure_policy,
            self.config.sources.len(),
            terms,
            failures,
        );
        let status = outcome.status();
        match &outcome.error {
            Some(message) => error!(
                "event=load_complete module=loader status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                message
            ),
            None => info!(
                "event=load_complete module=loader status={} duration_ms={} terms={} warnings={}",
                status.as_str(),
                started_at.elapsed().as_millis(),
                outcome.terms.len(),
                outcome.warnings.len()
            ),
        }
        outcome
    }
}

async fn fetch_with_timeout(
    fetcher: &dyn SourceFetcher,
    spec: &SourceSpec,
    timeout: Duration,
) -> SourceResult<SourceRecord> {
    let started_at = Instant::now();
    let result = match tokio::time::timeout(timeout, fetcher.fetch(spec)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::timed_out(spec, timeout.as_millis())),
    };

    match &result {
        Ok(record) => info!(
            "event=source_fetch module=loader status=ok subject={} entries={} duration_ms={}",
            spec.subject,
            record.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=source_fetch module=loader status=error subject={} duration_ms={} error_code={} error={}",
            spec.subject,
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    result
}

/// Converts one record into terms, skipping blank labels.
fn record_into_terms(subject: Subject, record: SourceRecord) -> Vec<Term> {
    if record.is_empty() {
        warn!(
            "event=source_empty module=loader status=warn subject={} message=record contains no terms",
            subject
        );
        return Vec::new();
    }

    let mut terms = Vec::with_capacity(record.len());
    for (label, definition) in record.into_entries() {
        match Term::new(subject, label, definition) {
            Ok(term) => terms.push(term),
            Err(err) => warn!(
                "event=term_skipped module=loader status=warn subject={} reason={}",
                subject, err
            ),
        }
    }
    terms
}

fn aggregate(
    policy: FailurePolicy,
    source_count: usize,
    terms: Vec<Term>,
    failures: Vec<SourceError>,
) -> LoadOutcome {
    match policy {
        FailurePolicy::AllOrNothing => {
            if let Some(first) = failures.first() {
                return LoadOutcome::failed(first.to_string());
            }
            with_notice_if_empty(LoadOutcome {
                terms,
                ..LoadOutcome::default()
            })
        }
        FailurePolicy::BestEffort => {
            let warnings: Vec<String> = failures.iter().map(ToString::to_string).collect();
            if source_count > 0 && failures.len() == source_count {
                return LoadOutcome {
                    warnings,
                    ..LoadOutcome::failed(failures[0].to_string())
                };
            }
            with_notice_if_empty(LoadOutcome {
                terms,
                warnings,
                ..LoadOutcome::default()
            })
        }
    }
}

fn with_notice_if_empty(mut outcome: LoadOutcome) -> LoadOutcome {
    if outcome.terms.is_empty() {
        warn!("event=load_empty module=loader status=warn message=no terms were loaded");
        outcome.notice = Some(NO_TERMS_NOTICE.to_string());
    }
    outcome
}
