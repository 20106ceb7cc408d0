use actix_web::{get, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{upload::service::UploadService, video::schema::VideoEntity},
    utils::{parse_video_id, Claims},
};

#[get("/videos")]
pub async fn list_videos(
    upload_service: web::Data<UploadService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<VideoEntity>>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let videos = upload_service.list_videos(user_id).await?;
    Ok(success::Success::ok(Some(videos)).message("Videos retrieved successfully"))
}

#[get("/videos/{video_id}")]
pub async fn get_video(
    upload_service: web::Data<UploadService>,
    video_id: web::Path<String>,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let video_id = parse_video_id(&video_id)?;
    let video = upload_service.get_video(video_id).await?;
    Ok(success::Success::ok(Some(video)).message("Video retrieved successfully"))
}
