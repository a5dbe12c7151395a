// ABOUTME: Template module for transtats job templates
// ABOUTME: Provides placeholder substitution and stored template handling

pub mod error;
pub mod preprocessor;
pub mod record;

pub use error::{Result, TemplateError};
pub use preprocessor::{YmlPreProcessor, DEFAULT_DELIMITER};
pub use record::{builtin_template, builtin_templates, JobTemplate};
