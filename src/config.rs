//! Layered configuration for calculators built from settings.
//!
//! Sources, lowest precedence first:
//! - Default values
//! - TOML configuration file (`.abacus/settings.toml`, searched upward from the
//!   current directory)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `ABACUS_` and use double
//! underscores to separate nested levels:
//! - `ABACUS_LOGGING__DEFAULT=debug` sets `logging.default`
//! - `ABACUS_CALCULATOR__TIMESTAMP_FORMAT='%F %T'` sets `calculator.timestamp_format`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calculator::DEFAULT_TIMESTAMP_FORMAT;
use crate::operations::BUILTIN_NAMES;

const CONFIG_DIR: &str = ".abacus";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "ABACUS_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level applied to every target without an explicit override
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `abacus = "debug"`
    #[serde(default)]
    pub modules: IndexMap<String, String>,

    /// Prefix each line with the event's target
    #[serde(default = "default_true")]
    pub show_target: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Built-in operations registered at construction
    #[serde(default = "default_preload")]
    pub preload: Vec<String>,

    /// strftime layout for history timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_version() -> u32 {
    1
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_true() -> bool {
    true
}
fn default_preload() -> Vec<String> {
    BUILTIN_NAMES.iter().map(|name| name.to_string()).collect()
}
fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            logging: LoggingConfig::default(),
            calculator: CalculatorConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: IndexMap::new(),
            show_target: true,
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            preload: default_preload(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nesting; single underscores stay in field names
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
    }

    /// Find `.abacus/settings.toml` from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
