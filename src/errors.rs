use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum ShortgateError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    UpstreamUnavailable(String),
    Config(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    Internal(String),
}

/// JSON body returned to clients for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ShortgateError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortgateError::Validation(_) => "E001",
            ShortgateError::NotFound(_) => "E002",
            ShortgateError::Conflict(_) => "E003",
            ShortgateError::UpstreamUnavailable(_) => "E004",
            ShortgateError::Config(_) => "E005",
            ShortgateError::DatabaseConnection(_) => "E006",
            ShortgateError::DatabaseOperation(_) => "E007",
            ShortgateError::Serialization(_) => "E008",
            ShortgateError::Internal(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortgateError::Validation(_) => "Validation Error",
            ShortgateError::NotFound(_) => "Resource Not Found",
            ShortgateError::Conflict(_) => "Identifier Conflict",
            ShortgateError::UpstreamUnavailable(_) => "Upstream Unavailable",
            ShortgateError::Config(_) => "Configuration Error",
            ShortgateError::DatabaseConnection(_) => "Database Connection Error",
            ShortgateError::DatabaseOperation(_) => "Database Operation Error",
            ShortgateError::Serialization(_) => "Serialization Error",
            ShortgateError::Internal(_) => "Internal Error",
        }
    }

    /// Wire identifier used in the JSON error body.
    ///
    /// Infrastructure-level variants collapse to `internal`; clients only
    /// distinguish the kinds named in the public error taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            ShortgateError::Validation(_) => "validation",
            ShortgateError::NotFound(_) => "not_found",
            ShortgateError::Conflict(_) => "conflict",
            ShortgateError::UpstreamUnavailable(_) => "upstream_unavailable",
            ShortgateError::Config(_)
            | ShortgateError::DatabaseConnection(_)
            | ShortgateError::DatabaseOperation(_)
            | ShortgateError::Serialization(_)
            | ShortgateError::Internal(_) => "internal",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortgateError::Validation(msg) => msg,
            ShortgateError::NotFound(msg) => msg,
            ShortgateError::Conflict(msg) => msg,
            ShortgateError::UpstreamUnavailable(msg) => msg,
            ShortgateError::Config(msg) => msg,
            ShortgateError::DatabaseConnection(msg) => msg,
            ShortgateError::DatabaseOperation(msg) => msg,
            ShortgateError::Serialization(msg) => msg,
            ShortgateError::Internal(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortgateError {}

// 便捷的构造函数
impl ShortgateError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortgateError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Conflict(msg.into())
    }

    pub fn upstream_unavailable<T: Into<String>>(msg: T) -> Self {
        ShortgateError::UpstreamUnavailable(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Config(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortgateError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortgateError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Serialization(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Internal(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ShortgateError {
    fn from(err: sea_orm::DbErr) -> Self {
        // A unique/primary-key violation is a typed conflict so callers can
        // retry allocation instead of failing the request.
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return ShortgateError::Conflict(msg);
        }
        ShortgateError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ShortgateError {
    fn from(err: std::io::Error) -> Self {
        ShortgateError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ShortgateError {
    fn from(err: serde_json::Error) -> Self {
        ShortgateError::Serialization(err.to_string())
    }
}

impl actix_web::ResponseError for ShortgateError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShortgateError::Validation(_) => StatusCode::BAD_REQUEST,
            ShortgateError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortgateError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            // Conflicts are recovered inside the storage service; one reaching
            // a client means allocation retry was exhausted or skipped.
            ShortgateError::Conflict(_)
            | ShortgateError::Config(_)
            | ShortgateError::DatabaseConnection(_)
            | ShortgateError::DatabaseOperation(_)
            | ShortgateError::Serialization(_)
            | ShortgateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind().to_string(),
            message: self.message().to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, ShortgateError>;
