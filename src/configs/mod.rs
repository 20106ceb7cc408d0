use aws_config::{BehaviorVersion, Region};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{api::error, modules::upload::storage::S3Storage};

/// Secret used to validate bearer tokens, shared with handlers as app data.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

pub async fn connect_database(database_url: &str) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// Builds the S3 client. A custom endpoint switches to path-style addressing
/// so MinIO and other S3-compatible stores work.
pub async fn connect_storage(region: &str, endpoint: Option<&str>) -> S3Storage {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;

    let client = match endpoint {
        Some(endpoint) => {
            let s3_config = aws_sdk_s3::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .force_path_style(true)
                .build();
            aws_sdk_s3::Client::from_conf(s3_config)
        }
        None => aws_sdk_s3::Client::new(&config),
    };

    log::info!("S3 client configured for region {}", region);
    S3Storage::new(client)
}
