use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{AuthConfig, connect_database, connect_storage},
    middlewares::authentication,
    modules::{
        upload::{Ffmpeg, UploadConfig, UploadService},
        video::repository_pg::VideoRepositoryPg,
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool = connect_database(&ENV.database_url).await.map_err(|e| {
        log::error!("Database connection error: {:?}", e);
        std::io::Error::other("Database connection error")
    })?;

    let storage = connect_storage(&ENV.s3_region, ENV.s3_endpoint.as_deref()).await;
    let media = Ffmpeg::new(ENV.ffmpeg_path.clone(), ENV.ffprobe_path.clone());
    let upload_config = UploadConfig::from_env(&ENV).map_err(|e| {
        log::error!("Invalid upload configuration: {}", e);
        std::io::Error::other(e)
    })?;

    let video_repo = VideoRepositoryPg::new(db_pool);
    let upload_service = UploadService::with_dependencies(
        Arc::new(video_repo),
        Arc::new(storage),
        Arc::new(media),
        upload_config,
    );
    let auth_config = AuthConfig { jwt_secret: ENV.jwt_secret.clone() };

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(upload_service.clone()))
            .app_data(web::Data::new(auth_config.clone()))
            .service(health_check)
            .configure(modules::upload::route::public_configure)
            .service(
                web::scope("")
                    .wrap(from_fn(authentication))
                    .configure(modules::video::route::configure)
                    .configure(modules::upload::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
