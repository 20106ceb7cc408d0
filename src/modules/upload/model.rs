use std::{path::PathBuf, time::Duration};

use crate::{
    api::error,
    constants::{self, Env},
    modules::upload::{aspect_ratio::RatioMatch, location::VideoUrlStrategy},
};

/// Everything the upload endpoints need to know about the deployment.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub assets_root: PathBuf,
    pub public_host: String,
    pub port: u16,
    pub max_thumbnail_size: usize,
    pub max_video_size: u64,
    pub bucket: String,
    pub fast_start: bool,
    pub ratio_match: RatioMatch,
    pub video_url: VideoUrlStrategy,
}

impl UploadConfig {
    pub fn from_env(env: &Env) -> Result<Self, error::SystemError> {
        let video_url = VideoUrlStrategy::from_mode(
            &env.video_url_mode,
            env.s3_cf_distribution.as_deref(),
            &env.s3_region,
            Duration::from_secs(env.presign_expiration),
        )?;

        let ratio_match = match env.aspect_ratio_tolerance {
            Some(epsilon) if epsilon.is_finite() && epsilon >= 0.0 => RatioMatch::Tolerance(epsilon),
            Some(epsilon) => {
                return Err(error::SystemError::config(format!(
                    "invalid ASPECT_RATIO_TOLERANCE {epsilon}"
                )));
            }
            None => RatioMatch::Exact,
        };

        Ok(Self {
            assets_root: PathBuf::from(&env.assets_root),
            public_host: env.public_host.clone(),
            port: env.port,
            max_thumbnail_size: env.max_thumbnail_size,
            max_video_size: env.max_video_size,
            bucket: env.s3_bucket.clone(),
            fast_start: env.fast_start,
            ratio_match,
            video_url,
        })
    }

    pub fn thumbnail_url(&self, name: &str) -> String {
        format!("http://{}:{}/assets/{}", self.public_host, self.port, name)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("./assets"),
            public_host: "localhost".to_string(),
            port: 8080,
            max_thumbnail_size: constants::MAX_THUMBNAIL_SIZE,
            max_video_size: constants::MAX_VIDEO_SIZE,
            bucket: String::new(),
            fast_start: true,
            ratio_match: RatioMatch::Exact,
            video_url: VideoUrlStrategy::Presigned {
                expires_in: Duration::from_secs(constants::PRESIGN_EXPIRATION),
            },
        }
    }
}

/// Thumbnail bytes as read from the multipart field.
#[derive(Debug)]
pub struct ThumbnailUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A validated video already spooled to a request-scoped temp file.
/// Dropping it deletes the file.
#[derive(Debug)]
pub struct VideoUpload {
    pub content_type: &'static str,
    pub file: tempfile::NamedTempFile,
}
