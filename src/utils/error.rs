use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    StorageRead(String),
    StorageWrite(String),
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageRead(msg) => write!(f, "Storage read error: {}", msg),
            AppError::StorageWrite(msg) => write!(f, "Storage write error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Maps error kinds to HTTP status codes.
///
/// Read failures are always 500 and lookups that miss are always 404. The
/// status for a failed write is a policy choice: `Conventional` answers 500,
/// `Legacy` answers 401 for clients that were built against the old server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStatusPolicy {
    #[default]
    Conventional,
    Legacy,
}

impl ErrorStatusPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "conventional" | "500" => Some(Self::Conventional),
            "legacy" | "401" => Some(Self::Legacy),
            _ => None,
        }
    }

    pub fn status_for(&self, error: &AppError) -> StatusCode {
        match (error, self) {
            (AppError::StorageRead(_), _) => StatusCode::INTERNAL_SERVER_ERROR,
            (AppError::StorageWrite(_), Self::Conventional) => StatusCode::INTERNAL_SERVER_ERROR,
            (AppError::StorageWrite(_), Self::Legacy) => StatusCode::UNAUTHORIZED,
            (AppError::NotFound(_), _) => StatusCode::NOT_FOUND,
        }
    }
}

/// `{"message": ...}` body used for every error response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
