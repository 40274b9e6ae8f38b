//! Storage node mapping endpoints
//!
//! `POST /shorten` and `GET /resolve/{short_id}`, thin wrappers over the
//! shortener service. Error rendering is owned by `ShortgateError`'s
//! `ResponseError` impl.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ShortgateError;
use crate::services::ShortenerService;

/// Body of a shorten request, on both the gateway and the storage node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

pub struct MappingService;

impl MappingService {
    pub async fn shorten(
        service: web::Data<Arc<ShortenerService>>,
        body: web::Json<ShortenRequest>,
    ) -> Result<HttpResponse, ShortgateError> {
        let mapping = service.create(&body.url).await?;
        Ok(HttpResponse::Ok().json(mapping))
    }

    pub async fn resolve(
        service: web::Data<Arc<ShortenerService>>,
        path: web::Path<String>,
    ) -> Result<HttpResponse, ShortgateError> {
        let short_id = path.into_inner();
        debug!("Resolving short id: {}", short_id);

        let mapping = service.resolve(&short_id).await?;
        Ok(HttpResponse::Ok().json(mapping))
    }
}

/// Mapping 路由配置
pub fn mapping_routes() -> actix_web::Scope {
    web::scope("")
        .route("/shorten", web::post().to(MappingService::shorten))
        .route("/resolve/{short_id}", web::get().to(MappingService::resolve))
}
