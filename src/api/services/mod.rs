pub mod health;
pub mod mapping;
pub mod metrics;
pub mod proxy;

pub use health::{HealthService, health_routes};
pub use mapping::{MappingService, ShortenRequest, mapping_routes};
pub use metrics::MetricsService;
pub use proxy::{ProxyService, proxy_routes};
