pub mod aspect_ratio;
pub mod asset_key;
pub mod handle;
pub mod location;
pub mod media_tool;
pub mod media_type;
pub mod model;
pub mod route;
pub mod service;
pub mod storage;

pub use media_tool::Ffmpeg;
pub use model::UploadConfig;
pub use service::UploadService;
