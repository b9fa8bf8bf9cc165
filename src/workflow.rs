use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::convert::{SubtitleConverter, WebVttConverter};
use crate::error::{Result, SubliftError};
use crate::fetch::{HttpTranscriptFetcher, TranscriptFetcher};
use crate::location::{self, MediaLocation};
use crate::storage::ObjectStore;
use crate::storage::s3::S3ObjectStore;
use crate::transcribe::aws::AwsTranscriptionService;
use crate::transcribe::{JobSpec, JobStatus, TranscriptionService};

const SUBTITLE_CONTENT_TYPE: &str = "text/vtt";

/// Sequential subtitle generation pipeline: normalize the media location,
/// submit a transcription job, poll it to completion, publish the converted
/// subtitle and clean up any staged copy.
///
/// Collaborators are injected so tests can substitute fakes; invocations
/// share no mutable state and may run concurrently, isolated by the
/// UUID-unique job names and staged-copy keys.
pub struct Workflow {
    config: Config,
    storage: Box<dyn ObjectStore>,
    transcriber: Box<dyn TranscriptionService>,
    fetcher: Box<dyn TranscriptFetcher>,
    converter: Box<dyn SubtitleConverter>,
}

/// Media resolved for submission, plus the staged copy to delete later.
struct NormalizedMedia {
    media_uri: String,
    staged_key: Option<String>,
}

impl Workflow {
    pub fn new(
        config: Config,
        storage: Box<dyn ObjectStore>,
        transcriber: Box<dyn TranscriptionService>,
        fetcher: Box<dyn TranscriptFetcher>,
        converter: Box<dyn SubtitleConverter>,
    ) -> Self {
        Self {
            config,
            storage,
            transcriber,
            fetcher,
            converter,
        }
    }

    /// Build a workflow backed by the AWS clients and the HTTP fetcher.
    pub async fn from_env(config: Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws.region.clone()))
            .load()
            .await;

        let storage = Box::new(S3ObjectStore::new(&sdk_config, &config.aws.bucket));
        let transcriber = Box::new(AwsTranscriptionService::new(&sdk_config));

        Self::new(
            config,
            storage,
            transcriber,
            Box::new(HttpTranscriptFetcher::new()),
            Box::new(WebVttConverter),
        )
    }

    /// Turn a video stored in S3 into a published WebVTT subtitle track and
    /// return the subtitle's public URL.
    pub async fn transcribe_and_generate_subtitle(&self, video_url: &str) -> Result<String> {
        info!("Generating subtitle for {}", video_url);

        let source = MediaLocation::parse(video_url)?;
        let normalized = self.normalize_location(video_url, &source).await?;

        let result = self.run_pipeline(&normalized.media_uri).await;

        // Once a staged copy exists it is deleted exactly once, on success
        // and failure paths alike
        if let Some(staged_key) = &normalized.staged_key {
            self.cleanup_staged_copy(staged_key).await;
        }

        result
    }

    async fn run_pipeline(&self, media_uri: &str) -> Result<String> {
        let job_name = self.submit_job(media_uri).await?;
        let transcript_uri = self.poll_job(&job_name).await?;
        self.publish_subtitle(&job_name, &transcript_uri).await
    }

    /// Stage the source video into the working bucket when it lives outside
    /// the service region; in-region sources pass through untouched. Sources
    /// whose region cannot be determined are staged as well.
    async fn normalize_location(
        &self,
        video_url: &str,
        source: &MediaLocation,
    ) -> Result<NormalizedMedia> {
        if source.region.as_deref() == Some(self.config.aws.region.as_str()) {
            debug!("Video already in service region {}", self.config.aws.region);
            return Ok(NormalizedMedia {
                media_uri: video_url.to_string(),
                staged_key: None,
            });
        }

        info!(
            "Video is outside service region {} (source region: {}), copying into working bucket",
            self.config.aws.region,
            source.region.as_deref().unwrap_or("unknown"),
        );

        let staged_key = format!(
            "{}/{}-{}",
            self.config.job.staging_prefix,
            Uuid::new_v4(),
            source.file_name()
        );

        self.storage.copy(source, &staged_key).await?;
        info!("Copied video for transcription: {}", staged_key);

        Ok(NormalizedMedia {
            media_uri: location::public_url(
                &self.config.aws.bucket,
                &self.config.aws.region,
                &staged_key,
            ),
            staged_key: Some(staged_key),
        })
    }

    /// Submit the transcription job under a freshly generated unique name.
    async fn submit_job(&self, media_uri: &str) -> Result<String> {
        let job_name = format!("{}-{}", self.config.job.job_name_prefix, Uuid::new_v4());

        let spec = JobSpec {
            name: job_name.clone(),
            media_uri: media_uri.to_string(),
            media_format: self.config.job.media_format.clone(),
            language_code: self.config.job.language_code.clone(),
            output_bucket: self.config.aws.bucket.clone(),
        };

        self.transcriber.start_job(&spec).await?;
        info!("Started transcription job: {}", job_name);

        Ok(job_name)
    }

    /// Block until the job reaches a terminal state. Every status query is
    /// preceded by a fixed-interval wait, the pipeline's only suspension
    /// point. Polling is unbounded; long-running jobs are expected and
    /// normal, and any upper bound belongs to the caller.
    async fn poll_job(&self, job_name: &str) -> Result<String> {
        let interval = Duration::from_secs(self.config.job.poll_interval_secs);

        loop {
            tokio::time::sleep(interval).await;

            match self.transcriber.job_status(job_name).await? {
                JobStatus::InProgress => {
                    debug!("Job {} still in progress", job_name);
                }
                JobStatus::Completed { transcript_uri } => {
                    info!("Job {} completed", job_name);
                    return Ok(transcript_uri);
                }
                JobStatus::Failed { reason } => {
                    return Err(SubliftError::TranscriptionJob(reason));
                }
            }
        }
    }

    /// Fetch the transcript, convert it and upload the subtitle file under a
    /// key derived from the job name.
    async fn publish_subtitle(&self, job_name: &str, transcript_uri: &str) -> Result<String> {
        let document = self.fetcher.fetch(transcript_uri).await?;
        let subtitle = self.converter.convert(&document)?;

        let subtitle_key = format!("{}/{}.vtt", self.config.job.subtitle_prefix, job_name);
        self.storage
            .put(&subtitle_key, subtitle.into_bytes(), SUBTITLE_CONTENT_TYPE)
            .await?;

        let subtitle_url = location::public_url(
            &self.config.aws.bucket,
            &self.config.aws.region,
            &subtitle_key,
        );
        info!("Subtitle uploaded: {}", subtitle_url);

        Ok(subtitle_url)
    }

    /// Delete the staged copy. Failure is reported and swallowed: a stray
    /// staged object never changes the invocation's outcome.
    async fn cleanup_staged_copy(&self, staged_key: &str) {
        match self.storage.delete(staged_key).await {
            Ok(()) => info!("Cleaned up staged video copy: {}", staged_key),
            Err(e) => warn!("Failed to delete staged copy {} (safe to ignore): {}", staged_key, e),
        }
    }
}
