// ABOUTME: Configuration management for the transtats-jobs application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::DEFAULT_DELIMITER;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default placeholder values, overridden by `--var`
    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Base URL of the translation platform used by `service`
    #[serde(default)]
    pub platform_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_vars: HashMap::new(),
            delimiter: DEFAULT_DELIMITER,
            platform_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".transtats").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        let possible_paths = [
            "transtats.yaml",
            "transtats.yml",
            ".transtats.yaml",
            ".transtats.yml",
        ];
        for path in possible_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return path;
            }
        }

        // May not exist
        PathBuf::from("transtats.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(level) = std::env::var("TRANSTATS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRANSTATS_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(url) = std::env::var("TRANSTATS_PLATFORM_URL") {
            self.platform_url = Some(url);
        }
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.delimiter, '%');
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.template_vars.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("transtats.yaml");

        fs::write(
            &config_path,
            r#"
template_vars:
  BUILD_SYSTEM: koji
platform_url: "https://translate.example.org"
logging:
  level: debug
  format: compact
"#,
        )
        .unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.template_vars.get("BUILD_SYSTEM"),
            Some(&"koji".to_string())
        );
        assert_eq!(config.delimiter, '%');
        assert!(config.platform_url.is_some());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("absent.yaml"))).unwrap();
        assert!(config.template_vars.is_empty());
    }

    #[test]
    fn test_merge_variables_overrides() {
        let mut config = Config::default();
        config
            .template_vars
            .insert("PACKAGE_NAME".to_string(), "ibus".to_string());

        let mut vars = HashMap::new();
        vars.insert("PACKAGE_NAME".to_string(), "anaconda".to_string());
        config.merge_variables(vars);

        assert_eq!(
            config.template_vars.get("PACKAGE_NAME"),
            Some(&"anaconda".to_string())
        );
    }
}
