//! Configuration file loading with precedence handling.

use crate::grid::derive::{Derivers, Metric, REFERENCE_COLUMN_WIDTH};
use crate::loading::DEFAULT_UPDATE_TRIGGER_MARGIN;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MGRID_CONFIG";

/// Environment variable overriding the fetch trigger margin.
pub const TRIGGER_MARGIN_ENV_VAR: &str = "MGRID_TRIGGER_MARGIN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/mgrid/config.toml`.
///
/// `column_count`, `gap` and `window_margin` are literal overrides that replace
/// the geometry-based formulas.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Px before the end of content at which a fetch fires.
    #[serde(default)]
    pub update_trigger_margin: Option<f64>,

    /// Reference column width for the default column formula.
    #[serde(default)]
    pub reference_column_width: Option<f64>,

    /// Fixed column count.
    #[serde(default)]
    pub column_count: Option<usize>,

    /// Fixed gap in px.
    #[serde(default)]
    pub gap: Option<f64>,

    /// Fixed window margin in px.
    #[serde(default)]
    pub window_margin: Option<f64>,

    /// Whether a loading indicator is rendered while fetching.
    #[serde(default)]
    pub show_loading_indicator: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Fetch trigger margin in px.
    pub update_trigger_margin: f64,
    /// Reference column width in px.
    pub reference_column_width: f64,
    /// Fixed column count, if overridden.
    pub column_count: Option<usize>,
    /// Fixed gap, if overridden.
    pub gap: Option<f64>,
    /// Fixed window margin, if overridden.
    pub window_margin: Option<f64>,
    /// Loading indicator configured.
    pub show_loading_indicator: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            update_trigger_margin: DEFAULT_UPDATE_TRIGGER_MARGIN,
            reference_column_width: REFERENCE_COLUMN_WIDTH,
            column_count: None,
            gap: None,
            window_margin: None,
            show_loading_indicator: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Build the derivation formulas: constants where overridden, defaults
    /// (with the configured reference column width) otherwise.
    pub fn derivers(&self) -> Derivers {
        let mut derivers = Derivers::default().with_reference_column_width(self.reference_column_width);
        if let Some(columns) = self.column_count {
            derivers.column_count = Metric::Constant(columns);
        }
        if let Some(gap) = self.gap {
            derivers.gap = Metric::Constant(gap);
        }
        if let Some(margin) = self.window_margin {
            derivers.window_margin = Metric::Constant(margin);
        }
        derivers
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/mgrid/mgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("mgrid").join("mgrid.log")
    } else {
        PathBuf::from("mgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/mgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MGRID_CONFIG` environment variable
/// 3. Default path `~/.config/mgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        update_trigger_margin: config
            .update_trigger_margin
            .unwrap_or(defaults.update_trigger_margin),
        reference_column_width: config
            .reference_column_width
            .unwrap_or(defaults.reference_column_width),
        column_count: config.column_count.or(defaults.column_count),
        gap: config.gap.or(defaults.gap),
        window_margin: config.window_margin.or(defaults.window_margin),
        show_loading_indicator: config
            .show_loading_indicator
            .unwrap_or(defaults.show_loading_indicator),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MGRID_TRIGGER_MARGIN`: Override the fetch trigger margin
///
/// Unparsable values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(TRIGGER_MARGIN_ENV_VAR) {
        match raw.trim().parse::<f64>() {
            Ok(margin) if margin.is_finite() => config.update_trigger_margin = margin,
            _ => warn!(value = %raw, "Ignoring invalid {}", TRIGGER_MARGIN_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    trigger_margin_override: Option<f64>,
    columns_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(margin) = trigger_margin_override {
        config.update_trigger_margin = margin;
    }

    if let Some(columns) = columns_override {
        config.column_count = Some(columns);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
