//! Source fetchers.
//!
//! # Responsibility
//! - Define the async seam the loader retrieves records through.
//! - Provide the default file/HTTP implementation.
//!
//! # Invariants
//! - Non-2xx HTTP responses are `Unavailable`, never parsed.
//! - Parse failures, including invalid UTF-8, are `Malformed` regardless
//!   of transport.

use super::record::SourceRecord;
use super::{SourceError, SourceLocation, SourceResult, SourceSpec};
use async_trait::async_trait;
use log::debug;

/// Retrieves one subject's record.
///
/// Implementations must be shareable across the concurrent per-subject
/// retrievals of a single load.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, spec: &SourceSpec) -> SourceResult<SourceRecord>;
}

/// Reads local files with `tokio::fs` and remote sources with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read_http(&self, spec: &SourceSpec, url: &str) -> SourceResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SourceError::unavailable(spec, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::unavailable(
                spec,
                format!("Status: {}", status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::unavailable(spec, err.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, spec: &SourceSpec) -> SourceResult<SourceRecord> {
        let bytes = match &spec.location {
            SourceLocation::File(path) => tokio::fs::read(path)
                .await
                .map_err(|err| SourceError::unavailable(spec, err.to_string()))?,
            SourceLocation::Http(url) => self.read_http(spec, url).await?,
        };
        debug!(
            "event=source_read module=source status=ok subject={} bytes={}",
            spec.subject,
            bytes.len()
        );

        SourceRecord::from_json_slice(&bytes)
            .map_err(|err| SourceError::malformed(spec, err.to_string()))
    }
}
