use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcribe a video and publish a WebVTT subtitle for it
    Transcribe {
        /// S3 URL of the source video
        #[arg(short, long)]
        input: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path for the configuration file
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
