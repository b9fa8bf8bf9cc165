use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SubliftError};

fn default_poll_interval_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aws: AwsConfig,
    pub job: JobConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region the Transcribe service operates in. Source videos outside this
    /// region are staged into the working bucket before submission.
    pub region: String,
    /// Working bucket for staged videos, job output and published subtitles.
    pub bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Language code passed to the transcription job
    pub language_code: String,
    /// Expected media format of submitted videos
    pub media_format: String,
    /// Seconds to wait between job status queries
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Prefix for generated transcription job names
    pub job_name_prefix: String,
    /// Key prefix for staged cross-region video copies
    pub staging_prefix: String,
    /// Key prefix for published subtitle files
    pub subtitle_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: AwsConfig {
                region: "us-west-1".to_string(),
                bucket: "transcription-subtitles-files".to_string(),
            },
            job: JobConfig {
                language_code: "en-US".to_string(),
                media_format: "mp4".to_string(),
                poll_interval_secs: 5,
                job_name_prefix: "transcription-job".to_string(),
                staging_prefix: "transcribed-video".to_string(),
                subtitle_prefix: "subtitles".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubliftError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }
}
