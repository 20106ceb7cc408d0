pub const MAX_THUMBNAIL_SIZE: usize = 10 << 20;
pub const MAX_VIDEO_SIZE: u64 = 10 << 30;
pub const PRESIGN_EXPIRATION: u64 = 60;

pub struct Env {
    pub jwt_secret: String,
    pub database_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub public_host: String,
    pub assets_root: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
    pub s3_cf_distribution: Option<String>,
    pub video_url_mode: String,
    pub presign_expiration: u64,
    pub fast_start: bool,
    pub aspect_ratio_tolerance: Option<f32>,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub max_thumbnail_size: usize,
    pub max_video_size: u64,
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        let public_host = std::env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost".to_string());
        let assets_root = std::env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".to_string());

        let s3_bucket = std::env::var("S3_BUCKET")
            .expect("S3_BUCKET must be set in .env file or environment variable");
        let s3_region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let s3_endpoint = optional_var("S3_ENDPOINT");
        let s3_cf_distribution = optional_var("S3_CF_DISTRIBUTION");

        let video_url_mode =
            std::env::var("VIDEO_URL_MODE").unwrap_or_else(|_| "presigned".to_string());
        let presign_expiration = std::env::var("PRESIGN_EXPIRATION")
            .unwrap_or_else(|_| PRESIGN_EXPIRATION.to_string())
            .parse::<u64>()
            .expect("PRESIGN_EXPIRATION must be a valid u64 integer");
        let fast_start = std::env::var("FAST_START")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .expect("FAST_START must be true or false");
        let aspect_ratio_tolerance = optional_var("ASPECT_RATIO_TOLERANCE").map(|v| {
            v.parse::<f32>().expect("ASPECT_RATIO_TOLERANCE must be a valid f32 number")
        });

        let ffmpeg_path = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());
        let ffprobe_path = std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string());

        let max_thumbnail_size = std::env::var("MAX_THUMBNAIL_SIZE")
            .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE.to_string())
            .parse::<usize>()
            .expect("MAX_THUMBNAIL_SIZE must be a valid usize integer");
        let max_video_size = std::env::var("MAX_VIDEO_SIZE")
            .unwrap_or_else(|_| MAX_VIDEO_SIZE.to_string())
            .parse::<u64>()
            .expect("MAX_VIDEO_SIZE must be a valid u64 integer");

        Env {
            jwt_secret,
            database_url,
            frontend_url,
            ip,
            port,
            public_host,
            assets_root,
            s3_bucket,
            s3_region,
            s3_endpoint,
            s3_cf_distribution,
            video_url_mode,
            presign_expiration,
            fast_start,
            aspect_ratio_tolerance,
            ffmpeg_path,
            ffprobe_path,
            max_thumbnail_size,
            max_video_size,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
