//! Configuration system for SiteForge.
//!
//! Load search configuration from TOML or YAML to control worker threads
//! and work granularity without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use siteforge_config::{SolverConfig, ThreadCount};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     chunk_size = 1024
//!     log_progress = true
//!
//!     [thread_count]
//!     specific = 4
//! "#).unwrap();
//!
//! assert_eq!(config.chunk_size, 1024);
//! assert_eq!(config.thread_count, ThreadCount::Specific(4));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use siteforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("siteforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of candidate indices handed to a worker at a time.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Number of worker threads.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Candidate indices per unit of parallel work.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    /// Whether to emit per-chunk trace events.
    #[serde(default)]
    pub log_progress: bool,
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            thread_count: ThreadCount::Auto,
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_progress: false,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, fails to parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the worker thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Sets the number of candidate indices per unit of work.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enables or disables per-chunk trace events.
    pub fn with_log_progress(mut self, log_progress: bool) -> Self {
        self.log_progress = log_progress;
        self
    }

    /// Checks the configuration for values the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be positive".to_string()));
        }
        if self.thread_count == ThreadCount::Specific(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Available CPU cores, capped to the number of work units.
    #[default]
    Auto,
    /// All available CPU cores.
    Unlimited,
    /// A specific number of threads, capped to the number of work units.
    Specific(usize),
}

impl ThreadCount {
    /// Resolves to an actual number of threads, never less than one.
    ///
    /// # Arguments
    ///
    /// * `work_units` - Number of independent units of work to schedule
    pub fn resolve(&self, work_units: u64) -> usize {
        let cap = usize::try_from(work_units).unwrap_or(usize::MAX).max(1);
        let cpus = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1);
        match self {
            ThreadCount::Auto => cpus.min(cap),
            ThreadCount::Unlimited => cpus,
            ThreadCount::Specific(n) => (*n).min(cap).max(1),
        }
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadCount::Auto => write!(f, "Auto"),
            ThreadCount::Unlimited => write!(f, "Unlimited"),
            ThreadCount::Specific(n) => write!(f, "{}", n),
        }
    }
}
