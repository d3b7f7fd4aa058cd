//! Runtime configuration from `.growthmap.toml`.
//!
//! Engines themselves are configuration-free pure functions; the file only
//! shapes how the binary renders, batches, and logs.
//!
//! ```toml
//! [output]
//! format = "yaml"
//! pretty = true
//!
//! [batch]
//! parallel = true
//! jobs = 4
//! fail_fast = false
//!
//! [logging]
//! level = "debug"
//! ```

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: default_pretty(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Run snapshots on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker threads; rayon's default when unset
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Exit non-zero when any snapshot fell back
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            jobs: None,
            fail_fast: false,
        }
    }
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if LEVELS.contains(&self.level.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "level must be one of {}, got '{}'",
                LEVELS.join(", "),
                self.level
            ))
        }
    }
}
