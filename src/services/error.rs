// ABOUTME: Error types for translation-platform service lookup
// ABOUTME: Unknown services fail fast instead of falling back to a default

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Invalid service: {0}")]
    InvalidService(String),

    #[error("No {method} endpoint registered at '{mount_point}' for service '{service}'")]
    MissingEndpoint {
        service: String,
        mount_point: String,
        method: String,
    },

    #[error("Missing path parameter '{param}' for service '{service}'")]
    MissingPathParam { service: String, param: String },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
