//! Configuration management for depwalk
//!
//! Handles configuration loading and validation. Every field has a default, so
//! an empty file (or no file at all) yields host-appropriate behaviour.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DepsError;

/// Top-level configuration (`depwalk.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepsConfig {
    /// Module resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    pub logging: Option<LoggingConfig>,
}

/// Module resolution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Platform system directory override (default: System32 on Windows, /lib elsewhere)
    pub system_dir: Option<String>,

    /// Platform installation directory override (default: %SystemRoot% on Windows, /usr/lib elsewhere)
    pub primary_dir: Option<String>,

    /// Environment variable holding the search path (default: PATH on Windows, LD_LIBRARY_PATH elsewhere)
    pub search_path_var: Option<String>,

    /// Directories searched after the environment search path
    #[serde(default)]
    pub extra_search_dirs: Vec<String>,

    /// Expand modules found in platform directories too
    #[serde(default)]
    pub recurse_into_platform: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. "info", "depwalk::graph=debug")
    pub filter: Option<String>,

    /// Emit JSON log lines (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

impl DepsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, DepsError> {
        let config: DepsConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.resolver.validate()
    }
}

impl ResolverConfig {
    /// Validate resolver configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(var) = &self.search_path_var {
            if var.trim().is_empty() {
                return Err(anyhow::anyhow!("search_path_var must not be empty"));
            }
        }

        let named_dirs = [("system_dir", &self.system_dir), ("primary_dir", &self.primary_dir)];
        for (field, dir) in named_dirs {
            if matches!(dir, Some(d) if d.trim().is_empty()) {
                return Err(anyhow::anyhow!("{} must not be empty when set", field));
            }
        }

        if self.extra_search_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(anyhow::anyhow!(
                "extra_search_dirs must not contain empty entries"
            ));
        }

        Ok(())
    }
}
