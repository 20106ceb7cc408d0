use std::time::Duration;

use crate::{api::error, modules::upload::storage::ObjectStorage};

/// How an uploaded object's location is stored on the record and shown to readers.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoUrlStrategy {
    /// Store `bucket,key` and return it unchanged.
    BucketKey,
    /// Store `https://<host>/<key>` for a CDN in front of the bucket.
    Cdn { host: String },
    /// Store the regional bucket URL.
    Regional { region: String },
    /// Store `bucket,key`; sign a GET URL each time the record is returned.
    Presigned { expires_in: Duration },
}

impl VideoUrlStrategy {
    pub fn from_mode(
        mode: &str,
        cdn_host: Option<&str>,
        region: &str,
        expires_in: Duration,
    ) -> Result<Self, error::SystemError> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "bucket_key" => Ok(VideoUrlStrategy::BucketKey),
            "cdn" => {
                let host = cdn_host.ok_or_else(|| {
                    error::SystemError::config("VIDEO_URL_MODE=cdn requires S3_CF_DISTRIBUTION")
                })?;
                Ok(VideoUrlStrategy::Cdn { host: host.trim_end_matches('/').to_string() })
            }
            "regional" => Ok(VideoUrlStrategy::Regional { region: region.to_string() }),
            "presigned" => Ok(VideoUrlStrategy::Presigned { expires_in }),
            other => {
                Err(error::SystemError::config(format!("unknown VIDEO_URL_MODE '{other}'")))
            }
        }
    }

    pub fn stored_location(&self, bucket: &str, key: &str) -> String {
        match self {
            VideoUrlStrategy::BucketKey | VideoUrlStrategy::Presigned { .. } => {
                format!("{bucket},{key}")
            }
            VideoUrlStrategy::Cdn { host } => format!("https://{host}/{key}"),
            VideoUrlStrategy::Regional { region } => {
                format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
            }
        }
    }

    /// Turns a stored location into the URL handed to clients. Only the
    /// presigned strategy rewrites anything; locations that are not a
    /// `bucket,key` pair pass through.
    pub async fn present(
        &self,
        stored: &str,
        storage: &(dyn ObjectStorage + Send + Sync),
    ) -> Result<String, error::SystemError> {
        let VideoUrlStrategy::Presigned { expires_in } = self else {
            return Ok(stored.to_string());
        };

        match stored.split_once(',') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                storage.presign_get(bucket, key, *expires_in).await
            }
            _ => Ok(stored.to_string()),
        }
    }
}
