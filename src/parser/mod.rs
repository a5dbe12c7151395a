// ABOUTME: Parser module for YAML job templates
// ABOUTME: Exports the parsed job, task structures, and job validation

pub mod error;
pub mod job;
pub mod task;
pub mod validation;

pub use error::{ParserError, Result, ValidationError};
pub use job::{ExecutionMode, JobParser, ParsedJob};
pub use task::{Command, TaskList, TaskNode};
pub use validation::{JobValidator, ValidationReport};
