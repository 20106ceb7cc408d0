use uuid::Uuid;

use crate::{api::error, modules::video::schema::VideoEntity};

#[async_trait::async_trait]
pub trait VideoRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<VideoEntity>, error::SystemError>;

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<VideoEntity>, error::SystemError>;

    /// Overwrites the mutable columns of the record and returns the stored row.
    async fn update(&self, video: &VideoEntity) -> Result<VideoEntity, error::SystemError>;
}
