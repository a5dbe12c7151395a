// ABOUTME: Main application orchestration for the transtats-jobs CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Logs go to stderr so rendered templates on stdout stay clean
        let result = match self.config.logging.format.as_str() {
            "compact" => tracing_subscriber::fmt()
                .compact()
                .with_env_filter(env_filter)
                .with_ansi(!no_color)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
            "json" => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(!no_color)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting transtats-jobs v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        // Command-line values win over configured defaults
        match &args.command {
            Commands::Render { vars, .. }
            | Commands::Parse { vars, .. }
            | Commands::Validate { vars, .. } => {
                let variables = Args::parse_variables(vars)?;
                self.config.merge_variables(variables);
            }
            _ => {}
        }

        match args.command {
            Commands::Render { template, json, .. } => {
                commands::render_template(template, json, &self.config).await
            }

            Commands::Parse {
                template,
                json,
                format,
                ..
            } => commands::parse_template(template, json, format, &self.config).await,

            Commands::Validate {
                template,
                json,
                strict,
                ..
            } => commands::validate_template(template, json, strict, &self.config).await,

            Commands::Service {
                name,
                base_url,
                params,
                ext,
            } => commands::show_service(&name, base_url, &params, ext, &self.config),

            Commands::Services => commands::list_services(),
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
