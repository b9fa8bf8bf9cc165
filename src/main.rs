//! Sublift - Automated Subtitle Generation Workflow
//!
//! This is the main entry point for the Sublift application, which turns a
//! video stored in S3 into a published WebVTT subtitle track using Amazon
//! Transcribe.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sublift::cli::{Args, Commands};
use sublift::config::Config;
use sublift::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    info!("Starting Sublift - Automated Subtitle Generation Workflow");

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Execute command
    match args.command {
        Commands::Transcribe { input } => {
            info!("Transcribing video: {}", input);

            let workflow = Workflow::from_env(config).await;
            let subtitle_url = workflow.transcribe_and_generate_subtitle(&input).await?;

            println!("{}", subtitle_url);
        }
        Commands::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            info!("Wrote default configuration to {}", output.display());
        }
    }

    info!("Sublift workflow completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let sublift_dir = std::env::current_dir()?.join(".sublift");
    let log_dir = sublift_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "sublift.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
