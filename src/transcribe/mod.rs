// Transcription job service seam.
//
// The provider runs jobs asynchronously in a shared namespace: the workflow
// submits a uniquely named job, then queries its status until a terminal
// state is observed. Provider-defined transient states beyond "in progress"
// (queued, etc.) are collapsed into `JobStatus::InProgress` so the poller
// treats them uniformly as not yet terminal.

pub mod aws;

use async_trait::async_trait;

use crate::error::Result;

/// Parameters for starting a transcription job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Unique job name within the provider's job namespace
    pub name: String,
    /// Location of the media to transcribe
    pub media_uri: String,
    /// Expected media container format (e.g. "mp4")
    pub media_format: String,
    /// Language of the spoken audio (e.g. "en-US")
    pub language_code: String,
    /// Working bucket the provider writes the transcript into
    pub output_bucket: String,
}

/// Observed state of a transcription job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Any non-terminal provider state
    InProgress,
    /// Terminal success; the transcript is ready at `transcript_uri`
    Completed { transcript_uri: String },
    /// Terminal failure with the provider-supplied reason
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Submit a new transcription job. Rejections surface as
    /// `SubliftError::Submission` and are terminal for the invocation.
    async fn start_job(&self, spec: &JobSpec) -> Result<()>;

    /// Query the current status of a previously submitted job.
    async fn job_status(&self, job_name: &str) -> Result<JobStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(
            JobStatus::Completed {
                transcript_uri: "https://example/transcript.json".to_string()
            }
            .is_terminal()
        );
        assert!(
            JobStatus::Failed {
                reason: "Bad audio format".to_string()
            }
            .is_terminal()
        );
    }
}
