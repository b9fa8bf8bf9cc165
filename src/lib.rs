//! Sublift - Automated Subtitle Generation Workflow
//!
//! A Rust implementation of an automated workflow for generating WebVTT
//! subtitle tracks for videos stored in S3, using Amazon Transcribe for
//! speech-to-text.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod location;
pub mod storage;
pub mod transcribe;
pub mod workflow;
