// ABOUTME: Error types for job template operations
// ABOUTME: Covers stored template decoding, YAML rendering, and parameter binding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to decode template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render template as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template '{template}' expects {expected} parameters, got {actual}")]
    ParamCountMismatch {
        template: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid template: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
