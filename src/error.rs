use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubliftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid media reference: {0}")]
    InvalidReference(String),

    #[error("Failed to stage media copy: {0}")]
    Staging(String),

    #[error("Transcription job submission rejected: {0}")]
    Submission(String),

    #[error("Transcription job failed: {0}")]
    TranscriptionJob(String),

    #[error("Transcript download failed: {0}")]
    Fetch(String),

    #[error("Subtitle conversion failed: {0}")]
    Conversion(String),

    #[error("Subtitle upload failed: {0}")]
    Publish(String),

    /// Staged-copy deletion failed. Non-fatal: logged at the point of
    /// occurrence, never returned from the workflow.
    #[error("Cleanup of staged copy failed: {0}")]
    Cleanup(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SubliftError>;
