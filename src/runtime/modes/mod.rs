//! Node modes
//!
//! One binary, two modes: the storage node and the public gateway. Each
//! mode wires its own routes behind the same instrumentation chain.

pub mod gateway;
pub mod storage;

use actix_web::web;

use crate::errors::ShortgateError;

/// JSON extractor config shared by both modes: a malformed body becomes a
/// structured `validation` error instead of actix's default response.
pub fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ShortgateError::validation(format!("invalid JSON body: {}", err)).into()
    })
}
