// ABOUTME: Main library module for transtats job templates
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod parser;
pub mod services;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use parser::{JobParser, JobValidator, ParsedJob, TaskList, TaskNode};
pub use services::{Service, ServiceConfig};
pub use template::{JobTemplate, YmlPreProcessor};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
