mod endpoint;
pub mod timing;
pub mod trace;

pub use endpoint::{classify_endpoint, operation_name};
pub use timing::TimingMiddleware;
pub use trace::TraceMiddleware;
