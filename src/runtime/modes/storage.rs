//! Storage node mode
//!
//! Owns identifier allocation and the mapping table. Serves `/shorten`,
//! `/resolve/{short_id}`, `/health`, and `/metrics`.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::info;

use super::json_error_config;
use crate::api::middleware::{TimingMiddleware, TraceMiddleware};
use crate::api::services::{MetricsService, health_routes, mapping_routes};
use crate::config::StorageNodeConfig;
use crate::observability::Observability;
use crate::services::{IdAllocator, ShortenerService};
use crate::storage::MappingStore;
use crate::storage::backend::SeaOrmMappingStore;

pub const SERVICE_NAME: &str = "shortgate-storage";

/// Run the storage node
pub async fn run_storage_node() -> Result<()> {
    let config = StorageNodeConfig::from_env()?;

    let obs = Arc::new(Observability::new(SERVICE_NAME)?);

    let store = SeaOrmMappingStore::new(&config.database_url, config.pool_size).await?;
    info!("Using storage backend: {}", store.backend_name());
    let store: Arc<dyn MappingStore> = Arc::new(store);

    let shortener = Arc::new(ShortenerService::new(store, IdAllocator));

    let bind_address = format!("{}:{}", config.host, config.port);
    info!("Starting storage node at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware::new(obs.clone()))
            .wrap(TraceMiddleware::new(obs.clone()))
            .app_data(web::Data::new(shortener.clone()))
            .app_data(web::Data::new(obs.clone()))
            .app_data(json_error_config())
            .service(health_routes())
            .route("/metrics", web::get().to(MetricsService::metrics))
            .service(mapping_routes())
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
