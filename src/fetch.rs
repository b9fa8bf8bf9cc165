use async_trait::async_trait;
use tracing::debug;

use crate::convert::TranscriptDocument;
use crate::error::{Result, SubliftError};

/// Downloads the raw transcript document produced by a completed job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch and parse the transcript at `url`. Non-success responses and
    /// transport failures surface as `SubliftError::Fetch`. No retries.
    async fn fetch(&self, url: &str) -> Result<TranscriptDocument>;
}

pub struct HttpTranscriptFetcher {
    client: reqwest::Client,
}

impl HttpTranscriptFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptFetcher for HttpTranscriptFetcher {
    async fn fetch(&self, url: &str) -> Result<TranscriptDocument> {
        debug!("Downloading transcript from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SubliftError::Fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubliftError::Fetch(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        response
            .json::<TranscriptDocument>()
            .await
            .map_err(|e| SubliftError::Fetch(format!("invalid transcript body from {}: {}", url, e)))
    }
}
