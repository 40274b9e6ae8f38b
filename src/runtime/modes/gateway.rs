//! Gateway mode
//!
//! Public-facing entry point. Forwards `/shorten` and `/resolve/{short_id}`
//! to the storage node and serves its own `/metrics`.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::info;

use super::json_error_config;
use crate::api::middleware::{TimingMiddleware, TraceMiddleware};
use crate::api::services::{MetricsService, proxy_routes};
use crate::client::StorageClient;
use crate::config::GatewayConfig;
use crate::observability::Observability;

pub const SERVICE_NAME: &str = "shortgate-gateway";

/// Run the gateway
pub async fn run_gateway() -> Result<()> {
    let config = GatewayConfig::from_env()?;

    let obs = Arc::new(Observability::new(SERVICE_NAME)?);

    let client = Arc::new(StorageClient::new(
        &config.storage_base_url,
        config.upstream_timeout,
    )?);
    info!(
        "Forwarding to storage node at {} (timeout {:?})",
        config.storage_base_url, config.upstream_timeout
    );

    let bind_address = format!("{}:{}", config.host, config.port);
    info!("Starting gateway at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware::new(obs.clone()))
            .wrap(TraceMiddleware::new(obs.clone()))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(obs.clone()))
            .app_data(json_error_config())
            .route("/metrics", web::get().to(MetricsService::metrics))
            .service(proxy_routes())
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
