// ABOUTME: Job validation applied after substitution and parsing
// ABOUTME: Reports missing fields, malformed tasks, unknown commands and leftover placeholders

use serde_yaml::Value;
use tracing::warn;

use super::error::{Result, ValidationError};
use super::job::{ExecutionMode, ParsedJob};
use super::task::{Command, TaskNode};
use crate::template::DEFAULT_DELIMITER;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct JobValidator {
    strict_mode: bool,
    delimiter: char,
}

impl JobValidator {
    pub fn new() -> Self {
        Self {
            strict_mode: false,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// In strict mode every warning is reported as an error
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn validate(&self, job: &ParsedJob) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_fields(job, &mut report);
        self.validate_tasks(job, &mut report);
        self.check_placeholders(job, &mut report);

        for warning in &report.warnings {
            warn!("Job '{}': {}", job.job_name(), warning);
        }

        if self.strict_mode {
            let promoted: Vec<ValidationError> = report
                .warnings
                .drain(..)
                .map(ValidationError::Warning)
                .collect();
            report.errors.extend(promoted);
        }

        report.is_valid = report.errors.is_empty();
        report
    }

    /// Validate and turn the first error into a failure
    pub fn ensure_valid(&self, job: &ParsedJob) -> Result<ValidationReport> {
        let report = self.validate(job);
        match report.errors.first() {
            Some(error) => Err(error.clone().into()),
            None => Ok(report),
        }
    }

    fn validate_fields(&self, job: &ParsedJob, report: &mut ValidationReport) {
        if job.job_name().trim().is_empty() {
            report.errors.push(ValidationError::MissingField {
                field: "name".to_string(),
            });
        }
        if job.job_type().trim().is_empty() {
            report.errors.push(ValidationError::MissingField {
                field: "type".to_string(),
            });
        }

        match job.execution_mode() {
            ExecutionMode::Sequential | ExecutionMode::Parallel => {}
            ExecutionMode::Unspecified => report
                .warnings
                .push("execution mode is not set".to_string()),
            ExecutionMode::Other(mode) => report
                .warnings
                .push(format!("unrecognised execution mode '{}'", mode)),
        }
    }

    fn validate_tasks(&self, job: &ParsedJob, report: &mut ValidationReport) {
        let tasks = job.tasks();
        if tasks.is_empty() {
            report.errors.push(ValidationError::EmptyJob);
            return;
        }

        for (index, value) in tasks.iter().enumerate() {
            let Some(node) = TaskNode::from_value(value) else {
                report.errors.push(ValidationError::MalformedTask { index });
                continue;
            };

            if node.known_command().is_none() {
                report.errors.push(ValidationError::UnknownCommand {
                    index,
                    command: node.command().to_string(),
                    supported: Command::supported(),
                });
            }

            if node.extra_keys() > 0 {
                report.warnings.push(format!(
                    "task #{} ('{}') has {} extra key(s) that will be ignored",
                    index,
                    node.command(),
                    node.extra_keys()
                ));
            }
        }
    }

    fn check_placeholders(&self, job: &ParsedJob, report: &mut ValidationReport) {
        let fields = [
            ("buildsys", job.buildsys()),
            ("release", job.release()),
            ("ci_pipeline", job.ci_pipeline()),
            ("package", job.package()),
            ("name", job.job_name()),
            ("type", job.job_type()),
        ];
        for (field, value) in fields {
            if self.looks_like_placeholder(&value) {
                report
                    .warnings
                    .push(format!("field '{}' still holds placeholder {}", field, value));
            }
        }

        for tag in job.tags() {
            if self.looks_like_placeholder(&tag) {
                report
                    .warnings
                    .push(format!("tag still holds placeholder {}", tag));
            }
        }

        if let Some(Value::String(_)) = job.get("tasks") {
            report
                .warnings
                .push("`tasks` is a string, expected a list".to_string());
        }
    }

    fn looks_like_placeholder(&self, value: &str) -> bool {
        let value = value.trim();
        value.len() > 2 && value.starts_with(self.delimiter) && value.ends_with(self.delimiter)
    }
}

impl Default for JobValidator {
    fn default() -> Self {
        Self::new()
    }
}
