// ABOUTME: Parsed job structure and the YAML job template parser
// ABOUTME: Exposes read-only field accessors with defaults over the `job` mapping

use serde_yaml::{Mapping, Value};
use std::io::Read;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::error::{ParserError, Result};
use super::task::TaskList;

const DEFAULT_FIXTURE: &str = include_str!("../../fixtures/job-templates/stringchange.yml");

/// How the dispatcher is asked to run the task list. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    Parallel,
    Unspecified,
    Other(String),
}

impl ExecutionMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" => ExecutionMode::Unspecified,
            "sequential" => ExecutionMode::Sequential,
            "parallel" => ExecutionMode::Parallel,
            _ => ExecutionMode::Other(value.to_string()),
        }
    }
}

/// The `job` mapping of a substituted template.
///
/// Values are never mutated after parsing; every accessor falls back to an
/// empty string or empty list when its key is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedJob {
    data: Mapping,
}

impl ParsedJob {
    /// Parse a job from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content).map_err(ParserError::YamlError)?;
        Self::from_document(document)
    }

    /// Parse a job from any reader yielding YAML text
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(ParserError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse the job template bundled with the crate, used for development and tests
    pub fn default_fixture() -> Result<Self> {
        Self::from_yaml(DEFAULT_FIXTURE)
    }

    fn from_document(document: Value) -> Result<Self> {
        let mut root = match document {
            Value::Mapping(root) => root,
            Value::Null => {
                return Err(ParserError::InvalidFormat(
                    "document is empty".to_string(),
                ))
            }
            other => {
                return Err(ParserError::InvalidFormat(format!(
                    "expected a mapping at the top level, found {}",
                    kind_of(&other)
                )))
            }
        };

        let data = match root.remove("job") {
            None | Some(Value::Null) => {
                debug!("Template has no `job` mapping, using defaults");
                Mapping::new()
            }
            Some(Value::Mapping(job)) => job,
            Some(other) => {
                return Err(ParserError::InvalidFormat(format!(
                    "`job` must be a mapping, found {}",
                    kind_of(&other)
                )))
            }
        };

        debug!("Parsed job template with {} field(s)", data.len());
        Ok(Self { data })
    }

    /// Raw lookup of a field in the job mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn buildsys(&self) -> String {
        self.scalar("buildsys")
    }

    pub fn release(&self) -> String {
        self.scalar("release")
    }

    pub fn ci_pipeline(&self) -> String {
        self.scalar("ci_pipeline")
    }

    pub fn exception(&self) -> String {
        self.scalar("exception")
    }

    pub fn execution(&self) -> String {
        self.scalar("execution")
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::parse(&self.execution())
    }

    pub fn job_name(&self) -> String {
        self.scalar("name")
    }

    pub fn job_type(&self) -> String {
        self.scalar("type")
    }

    pub fn package(&self) -> String {
        self.scalar("package")
    }

    pub fn return_type(&self) -> String {
        self.scalar("return_type")
    }

    pub fn tags(&self) -> Vec<String> {
        match self.data.get("tags") {
            Some(Value::Sequence(tags)) => tags.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Value] {
        match self.data.get("tasks") {
            Some(Value::Sequence(tasks)) => tasks,
            _ => &[],
        }
    }

    /// Build the ordered task structure handed to the dispatcher
    pub fn task_list(&self) -> TaskList {
        TaskList::from_values(self.tasks())
    }

    fn scalar(&self, key: &str) -> String {
        self.data
            .get(key)
            .and_then(scalar_text)
            .unwrap_or_default()
    }
}

/// Text form of a scalar; `None` for null, sequences and mappings
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[derive(Debug, Clone)]
pub struct JobParser;

impl JobParser {
    pub fn new() -> Self {
        Self
    }

    pub async fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedJob> {
        let content = fs::read_to_string(path.as_ref())
            .await
            .map_err(ParserError::IoError)?;
        self.parse_string(&content)
    }

    pub fn parse_string(&self, content: &str) -> Result<ParsedJob> {
        ParsedJob::from_yaml(content)
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<ParsedJob> {
        ParsedJob::from_reader(reader)
    }

    pub fn parse_default_fixture(&self) -> Result<ParsedJob> {
        ParsedJob::default_fixture()
    }
}

impl Default for JobParser {
    fn default() -> Self {
        Self::new()
    }
}
