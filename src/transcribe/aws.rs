// Amazon Transcribe implementation of the job service seam

use async_trait::async_trait;
use aws_sdk_transcribe::Client;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat, TranscriptionJobStatus};
use tracing::debug;

use super::{JobSpec, JobStatus, TranscriptionService};
use crate::error::{Result, SubliftError};

pub struct AwsTranscriptionService {
    client: Client,
}

impl AwsTranscriptionService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl TranscriptionService for AwsTranscriptionService {
    async fn start_job(&self, spec: &JobSpec) -> Result<()> {
        debug!("Starting transcription job {} for {}", spec.name, spec.media_uri);

        self.client
            .start_transcription_job()
            .transcription_job_name(&spec.name)
            .media(Media::builder().media_file_uri(&spec.media_uri).build())
            .media_format(MediaFormat::from(spec.media_format.as_str()))
            .language_code(LanguageCode::from(spec.language_code.as_str()))
            .output_bucket_name(&spec.output_bucket)
            .send()
            .await
            .map_err(|e| SubliftError::Submission(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn job_status(&self, job_name: &str) -> Result<JobStatus> {
        let response = self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| SubliftError::TranscriptionJob(e.into_service_error().to_string()))?;

        let job = response.transcription_job().ok_or_else(|| {
            SubliftError::TranscriptionJob(format!("no job in response for {}", job_name))
        })?;

        match job.transcription_job_status() {
            Some(TranscriptionJobStatus::Completed) => {
                let transcript_uri = job
                    .transcript()
                    .and_then(|t| t.transcript_file_uri())
                    .ok_or_else(|| {
                        SubliftError::TranscriptionJob(format!(
                            "job {} completed without a transcript location",
                            job_name
                        ))
                    })?;

                Ok(JobStatus::Completed {
                    transcript_uri: transcript_uri.to_string(),
                })
            }
            Some(TranscriptionJobStatus::Failed) => Ok(JobStatus::Failed {
                reason: job.failure_reason().unwrap_or("unknown").to_string(),
            }),
            // Queued, in progress and any future provider states are all
            // non-terminal from the poller's point of view
            _ => Ok(JobStatus::InProgress),
        }
    }
}
