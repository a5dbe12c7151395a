// ABOUTME: Command implementations for the transtats-jobs CLI
// ABOUTME: Handles render, parse, validate, service and services commands

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::args::{Args, OutputFormat};
use super::config::Config;
use crate::parser::{JobParser, JobValidator, ParsedJob};
use crate::services::{all_services, ServiceConfig};
use crate::template::{JobTemplate, YmlPreProcessor};

#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub package: String,
    pub buildsys: String,
    pub release: String,
    pub ci_pipeline: String,
    pub exception: String,
    pub execution: String,
    pub return_type: String,
    pub tags: Vec<String>,
    pub tasks: Vec<TaskSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub command: String,
    pub namespace: Option<String>,
    pub action: String,
    pub options: serde_json::Value,
}

/// Read a template file, converting a stored JSON job document to YAML first
pub async fn load_template(path: &Path, json: bool) -> Result<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template '{}'", path.display()))?;

    if !json {
        return Ok(content);
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let template = JobTemplate::from_json_str("", &name, Vec::new(), &content)?;
    Ok(template.to_yaml()?)
}

/// Substitute configured placeholder values into template text
pub fn render_text(text: &str, config: &Config) -> String {
    let processor =
        YmlPreProcessor::with_delimiter(text, config.template_vars.clone(), config.delimiter);

    let unresolved = processor.unresolved();
    if !unresolved.is_empty() {
        debug!("Placeholders without values: {:?}", unresolved);
    }
    info!(
        "Substituted {} placeholder(s)",
        processor.placeholders().len()
    );

    processor.output()
}

async fn render_and_parse(template: &Path, json: bool, config: &Config) -> Result<ParsedJob> {
    let text = load_template(template, json).await?;
    let rendered = render_text(&text, config);
    JobParser::new()
        .parse_string(&rendered)
        .map_err(|e| anyhow::anyhow!("Failed to parse job template: {}", e))
}

/// Build a display summary of a parsed job
pub fn summarize(job: &ParsedJob) -> Result<JobSummary> {
    let mut tasks = Vec::new();
    for node in &job.task_list() {
        let options = serde_json::to_value(node.options())
            .context("Task options cannot be represented as JSON")?;
        tasks.push(TaskSummary {
            command: node.command().to_string(),
            namespace: node.known_command().map(|c| c.namespace()),
            action: node.action(),
            options,
        });
    }

    Ok(JobSummary {
        name: job.job_name(),
        job_type: job.job_type(),
        package: job.package(),
        buildsys: job.buildsys(),
        release: job.release(),
        ci_pipeline: job.ci_pipeline(),
        exception: job.exception(),
        execution: job.execution(),
        return_type: job.return_type(),
        tags: job.tags(),
        tasks,
    })
}

/// Render a template and print the substituted text
pub async fn render_template(template: PathBuf, json: bool, config: &Config) -> Result<()> {
    info!("Rendering job template: {}", template.display());

    let text = load_template(&template, json).await?;
    print!("{}", render_text(&text, config));

    Ok(())
}

/// Render and parse a template, then print the job
pub async fn parse_template(
    template: PathBuf,
    json: bool,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    info!("Parsing job template: {}", template.display());

    let job = render_and_parse(&template, json, config).await?;
    let summary = summarize(&job)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }

    Ok(())
}

/// Render, parse and validate a template
pub async fn validate_template(
    template: PathBuf,
    json: bool,
    strict: bool,
    config: &Config,
) -> Result<()> {
    info!("Validating job template: {}", template.display());

    let job = render_and_parse(&template, json, config).await?;
    let report = JobValidator::new()
        .with_strict_mode(strict)
        .with_delimiter(config.delimiter)
        .validate(&job);

    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
    for error in &report.errors {
        println!("  error: {}", error);
    }

    if !report.is_valid {
        return Err(anyhow::anyhow!(
            "Job template '{}' is invalid ({} error(s))",
            template.display(),
            report.errors.len()
        ));
    }

    println!("✓ Job '{}' is valid", job.job_name());
    println!("  Type: {}", job.job_type());
    println!("  Tasks: {}", job.tasks().len());

    info!("Job template validation completed successfully");
    Ok(())
}

/// Print a service's REST configuration and, given a base URL, its request URL
pub fn show_service(
    name: &str,
    base_url: Option<String>,
    params: &[String],
    ext: Option<String>,
    config: &Config,
) -> Result<()> {
    let service = ServiceConfig::new(name)?;
    let descriptor = service.describe();
    println!("{}", serde_json::to_string_pretty(&descriptor)?);

    if let Some(base_url) = base_url.or_else(|| config.platform_url.clone()) {
        let path_args = Args::parse_variables(params)?;
        let url = service.url(&base_url, &path_args, ext.as_deref())?;
        println!("{} {}", service.http_method(), url);
    }

    Ok(())
}

/// Print every known service
pub fn list_services() -> Result<()> {
    for service in all_services()? {
        println!(
            "{:<22} {:<7} {}",
            service.service().as_str(),
            service.http_method().as_str(),
            service.resource()
        );
    }
    Ok(())
}

fn print_summary(summary: &JobSummary) {
    println!("Job '{}' ({})", summary.name, summary.job_type);
    let fields = [
        ("package", &summary.package),
        ("buildsys", &summary.buildsys),
        ("release", &summary.release),
        ("ci_pipeline", &summary.ci_pipeline),
        ("exception", &summary.exception),
        ("execution", &summary.execution),
        ("return_type", &summary.return_type),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            println!("  {}: {}", label, value);
        }
    }
    if !summary.tags.is_empty() {
        println!("  tags: {}", summary.tags.join(", "));
    }

    println!("  tasks:");
    for (index, task) in summary.tasks.iter().enumerate() {
        println!(
            "    {}. {} -> {}",
            index + 1,
            task.namespace.as_deref().unwrap_or(&task.command),
            task.action
        );
        if let Some(options) = task.options.as_object() {
            for (key, value) in options {
                println!("       {}: {}", key, value);
            }
        }
    }
}
