// Object storage seam for the subtitle workflow.
//
// The workflow only ever writes into its single working bucket, so the trait
// is scoped to it: sources of copies may live anywhere, destinations are
// always working-bucket keys. Each operation maps onto one error kind of the
// workflow taxonomy (copy -> Staging, put -> Publish, delete -> Cleanup).

pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::location::MediaLocation;

/// Object storage operations against the working bucket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Server-side copy of `source` into the working bucket at `dest_key`.
    /// Failures surface as `SubliftError::Staging`.
    async fn copy(&self, source: &MediaLocation, dest_key: &str) -> Result<()>;

    /// Upload `body` to `key` in the working bucket with the given content
    /// type. Failures surface as `SubliftError::Publish`.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    /// Delete `key` from the working bucket. Failures surface as
    /// `SubliftError::Cleanup`.
    async fn delete(&self, key: &str) -> Result<()>;
}
