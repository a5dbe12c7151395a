// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for transtats-jobs

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "transtats-jobs")]
#[command(about = "Render, parse and validate transtats YAML job templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Substitute placeholders in a job template and print the result
    Render {
        #[arg(help = "Path to the job template")]
        template: PathBuf,

        #[arg(short = 'V', long = "var", help = "Placeholder value (KEY=VALUE)")]
        vars: Vec<String>,

        #[arg(long, help = "Template is a stored JSON job document")]
        json: bool,
    },

    /// Render and parse a job template, then print the job
    Parse {
        #[arg(help = "Path to the job template")]
        template: PathBuf,

        #[arg(short = 'V', long = "var", help = "Placeholder value (KEY=VALUE)")]
        vars: Vec<String>,

        #[arg(long, help = "Template is a stored JSON job document")]
        json: bool,

        #[arg(short, long, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },

    /// Render, parse and validate a job template
    Validate {
        #[arg(help = "Path to the job template")]
        template: PathBuf,

        #[arg(short = 'V', long = "var", help = "Placeholder value (KEY=VALUE)")]
        vars: Vec<String>,

        #[arg(long, help = "Template is a stored JSON job document")]
        json: bool,

        #[arg(long, help = "Treat warnings as errors")]
        strict: bool,
    },

    /// Show the REST configuration of a platform service
    Service {
        #[arg(help = "Service name, e.g. list_projects")]
        name: String,

        #[arg(long, help = "Platform base URL used to build the request URL")]
        base_url: Option<String>,

        #[arg(short = 'P', long = "param", help = "Path parameter (KEY=VALUE)")]
        params: Vec<String>,

        #[arg(long, help = "Suffix appended to the URL, e.g. ?lang=hi")]
        ext: Option<String>,
    },

    /// List every known platform service
    Services,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from KEY=VALUE format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'KEY=VALUE'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
