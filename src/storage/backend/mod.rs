//! SeaORM mapping store
//!
//! Database persistence using SeaORM, supporting SQLite, MySQL/MariaDB, and
//! PostgreSQL. The backend is inferred from the database URL.

mod connection;

use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::warn;

use super::{MappingStore, UrlMapping};
use crate::errors::{Result, ShortgateError};
use async_trait::async_trait;

use migration::entities::url_mapping;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ShortgateError::config(format!(
            "cannot infer database backend from URL: {}. Supported URL schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based mapping store
#[derive(Clone)]
pub struct SeaOrmMappingStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmMappingStore {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ShortgateError::config("DATABASE_URL is not set"));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, pool_size).await?
        };

        let store = SeaOrmMappingStore { db, backend_name };

        // Schema is created idempotently on every startup
        run_migrations(&store.db).await?;

        warn!("{} storage initialized", store.backend_name.to_uppercase());
        Ok(store)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl MappingStore for SeaOrmMappingStore {
    async fn put(&self, mapping: &UrlMapping) -> Result<()> {
        let model = url_mapping::ActiveModel {
            short_id: Set(mapping.short_id.clone()),
            url: Set(mapping.url.clone()),
        };

        // A primary-key violation surfaces as ShortgateError::Conflict via
        // the DbErr conversion; everything else is a database fault.
        url_mapping::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn get(&self, short_id: &str) -> Result<Option<UrlMapping>> {
        let found = url_mapping::Entity::find_by_id(short_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                ShortgateError::database_operation(format!("mapping lookup failed: {}", e))
            })?;

        Ok(found.map(|model| UrlMapping {
            short_id: model.short_id,
            url: model.url,
        }))
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
