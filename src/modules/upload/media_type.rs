use actix_web::mime::Mime;

use crate::api::error;

pub const VIDEO_MP4: &str = "video/mp4";

/// Image formats accepted as thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailType {
    Png,
    Jpeg,
}

impl ThumbnailType {
    pub fn extension(&self) -> &'static str {
        match self {
            ThumbnailType::Png => "png",
            ThumbnailType::Jpeg => "jpg",
        }
    }
}

/// Lowercased `type/subtype` of a content-type header, parameters dropped.
fn essence(content_type: Option<&str>) -> Result<String, error::SystemError> {
    let raw = content_type
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| error::SystemError::bad_request("Missing Content-Type"))?;

    let mime = raw
        .parse::<Mime>()
        .map_err(|_| error::SystemError::bad_request("Could not parse media type"))?;

    Ok(mime.essence_str().to_ascii_lowercase())
}

pub fn validate_thumbnail(content_type: Option<&str>) -> Result<ThumbnailType, error::SystemError> {
    match essence(content_type)?.as_str() {
        "image/png" => Ok(ThumbnailType::Png),
        "image/jpeg" => Ok(ThumbnailType::Jpeg),
        other => Err(error::SystemError::bad_request(format!("Unsupported file type '{other}'"))),
    }
}

pub fn validate_video(content_type: Option<&str>) -> Result<&'static str, error::SystemError> {
    match essence(content_type)?.as_str() {
        VIDEO_MP4 => Ok(VIDEO_MP4),
        other => Err(error::SystemError::bad_request(format!("Unsupported file type '{other}'"))),
    }
}
