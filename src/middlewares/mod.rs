use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage, HttpRequest,
};

use crate::{api::error, configs::AuthConfig, utils::Claims};

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let auth = req.headers().get("Authorization").and_then(|h| h.to_str().ok());
    let token = match auth.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(t) => t.trim(),
        None => {
            return Err(error::Error::unauthorized("Couldn't find JWT").into());
        }
    };

    let secret = req
        .app_data::<web::Data<AuthConfig>>()
        .map(|cfg| cfg.jwt_secret.clone())
        .ok_or_else(|| {
            log::error!("AuthConfig is missing from app data");
            error::Error::InternalServer
        })?;

    let claims = Claims::decode(token, secret.as_bytes()).map_err(|e| {
        log::warn!("Rejected bearer token: {}", e);
        error::Error::unauthorized("Couldn't validate JWT")
    })?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_extensions<T>(req: &HttpRequest) -> Result<T, error::Error>
where
    T: Clone + 'static,
{
    let extensions = req.extensions();

    let value = extensions
        .get::<T>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(value)
}
