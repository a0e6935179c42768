//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.pre-create.toml` in current directory
//! 4. `~/.config/pre-create/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [project]
//! dir = "."                     # dbt project root
//! model_paths = ["models"]      # used when dbt_project.yml has none
//!
//! [template]
//! directory = "pre_create"
//! prefix = "template_"
//!
//! [log]
//! level = "warn"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `PRE_CREATE_PROJECT_DIR` | dbt project root |
//! | `PRE_CREATE_LOG` | Log filter, e.g. `debug` |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project:  ProjectConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub log:      LogConfig
}

/// Where the dbt project lives
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_dir")]
    pub dir:         PathBuf,
    /// Fallback when `dbt_project.yml` declares no model paths
    #[serde(default = "default_model_paths")]
    pub model_paths: Vec<String>
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir:         default_project_dir(),
            model_paths: default_model_paths()
        }
    }
}

/// Template file layout inside each model path
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_template_directory")]
    pub directory: String,
    #[serde(default = "default_template_prefix")]
    pub prefix:    String
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: default_template_directory(),
            prefix:    default_template_prefix()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level()
        }
    }
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

pub(crate) fn default_model_paths() -> Vec<String> {
    vec![String::from("models")]
}

fn default_template_directory() -> String {
    String::from("pre_create")
}

fn default_template_prefix() -> String {
    String::from("template_")
}

fn default_log_level() -> String {
    String::from("warn")
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.pre-create.toml)
    /// 3. Config file in home directory (~/.config/pre-create/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("pre-create")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config overrides home config
        let local_config = PathBuf::from(".pre-create.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env();
        Ok(config)
    }

    /// Parse a single TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse TOML config text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = env::var("PRE_CREATE_PROJECT_DIR") {
            self.project.dir = PathBuf::from(dir);
        }

        if let Ok(level) = env::var("PRE_CREATE_LOG") {
            self.log.level = level;
        }
    }
}
