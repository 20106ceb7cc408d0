use crate::modules::upload::handle::*;
use actix_web::web::ServiceConfig;

pub fn public_configure(cfg: &mut ServiceConfig) {
    cfg.service(serve_asset);
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload_thumbnail).service(upload_video);
}
