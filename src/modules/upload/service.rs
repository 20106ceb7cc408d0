use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempPath;
use uuid::Uuid;

use crate::api::error;
use crate::modules::upload::{
    aspect_ratio::AspectRatio,
    asset_key,
    media_tool::MediaTool,
    media_type,
    model::{ThumbnailUpload, UploadConfig, VideoUpload},
    storage::ObjectStorage,
};
use crate::modules::video::{repository::VideoRepository, schema::VideoEntity};

#[derive(Clone)]
pub struct UploadService {
    video_repo: Arc<dyn VideoRepository + Send + Sync>,
    storage: Arc<dyn ObjectStorage + Send + Sync>,
    media: Arc<dyn MediaTool + Send + Sync>,
    config: Arc<UploadConfig>,
}

impl UploadService {
    pub fn with_dependencies(
        video_repo: Arc<dyn VideoRepository + Send + Sync>,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        media: Arc<dyn MediaTool + Send + Sync>,
        config: UploadConfig,
    ) -> Self {
        info!("UploadService initialized with dependencies");
        UploadService { video_repo, storage, media, config: Arc::new(config) }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Loads the video and checks that `user_id` owns it. A foreign video is
    /// reported as unauthorized, not forbidden.
    pub async fn find_owned_video(
        &self,
        video_id: Uuid,
        user_id: Uuid,
    ) -> Result<VideoEntity, error::SystemError> {
        let video = self
            .video_repo
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Video not found"))?;

        if video.user_id != user_id {
            warn!("User {} tried to modify video {} owned by {}", user_id, video_id, video.user_id);
            return Err(error::SystemError::unauthorized("You do not own this video"));
        }

        Ok(video)
    }

    pub async fn upload_thumbnail(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        upload: ThumbnailUpload,
    ) -> Result<VideoEntity, error::SystemError> {
        let thumbnail_type = media_type::validate_thumbnail(upload.content_type.as_deref())?;

        let mut video = self.find_owned_video(video_id, user_id).await?;

        let name = asset_key::thumbnail_name(thumbnail_type.extension());
        tokio::fs::create_dir_all(&self.config.assets_root).await?;
        let path = self.config.assets_root.join(&name);
        tokio::fs::write(&path, &upload.bytes).await?;
        info!("Stored thumbnail for video {} at {}", video_id, path.display());

        video.thumbnail_url = Some(self.config.thumbnail_url(&name));

        match self.video_repo.update(&video).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                // the record never pointed at this file
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    warn!("Could not remove orphaned thumbnail {}: {}", path.display(), remove_err);
                }
                Err(e)
            }
        }
    }

    pub async fn upload_video(
        &self,
        mut video: VideoEntity,
        upload: VideoUpload,
    ) -> Result<VideoEntity, error::SystemError> {
        let source = upload.file.path();

        let dimensions = self.media.probe(source).await?;
        let aspect_ratio = AspectRatio::classify(dimensions, self.config.ratio_match);
        let key = asset_key::video_key(aspect_ratio);
        info!(
            "Video {} is {}x{} ({}), uploading as {}",
            video.id,
            dimensions.width,
            dimensions.height,
            aspect_ratio.label(),
            key
        );

        // Deleted on drop, whichever way this function exits.
        let processed: Option<TempPath> = if self.config.fast_start {
            let path: PathBuf = self.media.remux_fast_start(source).await?;
            Some(TempPath::try_from_path(path)?)
        } else {
            None
        };
        let body = processed.as_deref().unwrap_or(source);

        self.storage.put_object(&self.config.bucket, &key, body, upload.content_type).await?;

        video.video_url = Some(self.config.video_url.stored_location(&self.config.bucket, &key));
        let updated = match self.video_repo.update(&video).await {
            Ok(updated) => updated,
            Err(e) => {
                warn!(
                    "Object {}/{} was uploaded but video {} was not updated",
                    self.config.bucket, key, video.id
                );
                return Err(e);
            }
        };

        self.present(updated).await
    }

    /// Rewrites the stored video location into what clients should see.
    pub async fn present(&self, mut video: VideoEntity) -> Result<VideoEntity, error::SystemError> {
        if let Some(stored) = video.video_url.as_deref() {
            let url = self.config.video_url.present(stored, self.storage.as_ref()).await?;
            video.video_url = Some(url);
        }
        Ok(video)
    }

    pub async fn get_video(&self, video_id: Uuid) -> Result<VideoEntity, error::SystemError> {
        let video = self
            .video_repo
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Video not found"))?;
        self.present(video).await
    }

    pub async fn list_videos(&self, user_id: Uuid) -> Result<Vec<VideoEntity>, error::SystemError> {
        let videos = self.video_repo.find_by_user(&user_id).await?;
        let mut presented = Vec::with_capacity(videos.len());
        for video in videos {
            presented.push(self.present(video).await?);
        }
        Ok(presented)
    }

    /// Resolves a public asset name to a file under the assets root.
    pub fn asset_path(&self, name: &str) -> Result<PathBuf, error::SystemError> {
        let safe = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        if !safe {
            return Err(error::SystemError::bad_request("Invalid asset name"));
        }
        Ok(self.config.assets_root.join(name))
    }
}
