use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use tokio::io::AsyncWriteExt;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        upload::{
            media_type,
            model::{ThumbnailUpload, VideoUpload},
            service::UploadService,
        },
        video::schema::VideoEntity,
    },
    utils::{parse_video_id, Claims},
};

fn multipart_error(e: MultipartError) -> error::Error {
    error::Error::bad_request(format!("Could not parse multipart form: {e}"))
}

/// Running byte count across every field of one form.
struct BodyBudget {
    what: &'static str,
    limit: u64,
    used: u64,
}

impl BodyBudget {
    fn new(what: &'static str, limit: u64) -> Self {
        Self { what, limit, used: 0 }
    }

    fn consume(&mut self, len: usize) -> Result<(), error::Error> {
        self.used += len as u64;
        if self.used > self.limit {
            return Err(error::Error::payload_too_large(format!(
                "{} exceeds maximum allowed size of {} bytes",
                self.what, self.limit
            )));
        }
        Ok(())
    }
}

async fn drain(mut field: Field, budget: &mut BodyBudget) -> Result<(), error::Error> {
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        budget.consume(chunk.len())?;
    }
    Ok(())
}

/// Skips fields until the one called `name`. Skipped bytes still count.
async fn next_field_named(
    payload: &mut Multipart,
    name: &str,
    budget: &mut BodyBudget,
) -> Result<Field, error::Error> {
    while let Some(field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() == Some(name) {
            return Ok(field);
        }
        drain(field, budget).await?;
    }
    Err(error::Error::bad_request(format!("Missing form file '{name}'")))
}

async fn read_thumbnail(
    payload: &mut Multipart,
    limit: usize,
) -> Result<ThumbnailUpload, error::Error> {
    let mut budget = BodyBudget::new("Thumbnail", limit as u64);
    let mut field = next_field_named(payload, "thumbnail", &mut budget).await?;
    let content_type = field.content_type().map(|m| m.to_string());

    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        budget.consume(chunk.len())?;
        bytes.extend_from_slice(&chunk);
    }

    Ok(ThumbnailUpload { content_type, bytes })
}

/// Streams the `video` field into a temp file that is removed when dropped.
async fn spool_video(payload: &mut Multipart, limit: u64) -> Result<VideoUpload, error::Error> {
    let mut budget = BodyBudget::new("Video", limit);
    let mut field = next_field_named(payload, "video", &mut budget).await?;
    let content_type =
        media_type::validate_video(field.content_type().map(|m| m.to_string()).as_deref())?;

    let file = tempfile::Builder::new()
        .prefix("vidhost-upload-")
        .suffix(".mp4")
        .tempfile()
        .map_err(error::SystemError::from)?;
    let mut out =
        tokio::fs::File::from_std(file.reopen().map_err(error::SystemError::from)?);

    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        budget.consume(chunk.len())?;
        out.write_all(&chunk).await.map_err(error::SystemError::from)?;
    }
    out.flush().await.map_err(error::SystemError::from)?;

    log::debug!("Spooled {} bytes to {}", budget.used, file.path().display());
    Ok(VideoUpload { content_type, file })
}

#[post("/videos/{video_id}/thumbnail")]
pub async fn upload_thumbnail(
    upload_service: web::Data<UploadService>,
    video_id: web::Path<String>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let video_id = parse_video_id(&video_id)?;
    let user_id = get_extensions::<Claims>(&req)?.sub;
    log::info!("Uploading thumbnail for video {} by user {}", video_id, user_id);

    let upload = read_thumbnail(&mut payload, upload_service.config().max_thumbnail_size).await?;
    let video = upload_service.upload_thumbnail(video_id, user_id, upload).await?;

    Ok(success::Success::ok(Some(video)).message("Thumbnail uploaded successfully"))
}

#[post("/videos/{video_id}/video")]
pub async fn upload_video(
    upload_service: web::Data<UploadService>,
    video_id: web::Path<String>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<VideoEntity>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let video_id = parse_video_id(&video_id)?;
    log::info!("Uploading video {} by user {}", video_id, user_id);

    let video = upload_service.find_owned_video(video_id, user_id).await?;
    let upload = spool_video(&mut payload, upload_service.config().max_video_size).await?;
    let video = upload_service.upload_video(video, upload).await?;

    Ok(success::Success::ok(Some(video)).message("Video uploaded successfully"))
}

#[get("/assets/{name}")]
pub async fn serve_asset(
    upload_service: web::Data<UploadService>,
    name: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    let path = upload_service.asset_path(&name)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(error::Error::not_found("Asset not found"));
        }
        Err(e) => return Err(error::SystemError::from(e).into()),
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok(HttpResponse::Ok().content_type(mime.as_ref()).body(bytes))
}
