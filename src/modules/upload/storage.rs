use aws_sdk_s3::{
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client,
};
use std::{path::Path, time::Duration};

use crate::api::error;

/// Object-storage collaborator used by the video upload.
#[async_trait::async_trait]
pub trait ObjectStorage {
    /// Uploads the file at `body` under `bucket/key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &Path,
        content_type: &str,
    ) -> Result<(), error::SystemError>;

    /// Time-limited GET URL for `bucket/key`.
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError>;
}

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &Path,
        content_type: &str,
    ) -> Result<(), error::SystemError> {
        let start = std::time::Instant::now();

        let stream = ByteStream::from_path(body)
            .await
            .map_err(|e| error::SystemError::storage(format!("cannot read upload body: {e}")))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(stream)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                error::SystemError::storage(e.to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| error::SystemError::storage(e.to_string()))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| error::SystemError::storage(e.to_string()))?;

        Ok(presigned_request.uri().to_string())
    }
}
