// ABOUTME: Error types for job template parsing and validation
// ABOUTME: Keeps malformed templates distinguishable from empty ones

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read job template: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid job template format: {0}")]
    InvalidFormat(String),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required job field: {field}")]
    MissingField { field: String },

    #[error("Empty job: no tasks defined")]
    EmptyJob,

    #[error("Task #{index} is not a task descriptor")]
    MalformedTask { index: usize },

    #[error("Unknown command '{command}' in task #{index}. Supported commands: {supported:?}")]
    UnknownCommand {
        index: usize,
        command: String,
        supported: Vec<String>,
    },

    #[error("{0}")]
    Warning(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;
