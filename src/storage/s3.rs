// AWS S3 implementation of the object storage seam

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use super::ObjectStore;
use crate::error::{Result, SubliftError};
use crate::location::MediaLocation;

/// Escape set for the `x-amz-copy-source` header: everything except RFC 3986
/// unreserved characters and the path separator. The SDK passes the value
/// through verbatim, so decoded keys must be re-encoded here.
const COPY_SOURCE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

fn encoded_copy_source(source: &MediaLocation) -> String {
    utf8_percent_encode(&format!("{}/{}", source.bucket, source.key), COPY_SOURCE_SET).to_string()
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig, bucket: &str) -> Self {
        Self {
            client: Client::new(config),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn copy(&self, source: &MediaLocation, dest_key: &str) -> Result<()> {
        debug!(
            "Copying s3://{}/{} to s3://{}/{}",
            source.bucket, source.key, self.bucket, dest_key
        );

        self.client
            .copy_object()
            .copy_source(encoded_copy_source(source))
            .bucket(&self.bucket)
            .key(dest_key)
            .send()
            .await
            .map_err(|e| SubliftError::Staging(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        debug!("Uploading {} bytes to s3://{}/{}", body.len(), self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| SubliftError::Publish(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!("Deleting s3://{}/{}", self.bucket, key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| SubliftError::Cleanup(e.into_service_error().to_string()))?;

        Ok(())
    }
}
