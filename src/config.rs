//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`$XDG_CONFIG_HOME/logsift/config.toml` or `~/.config/logsift/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::error::LogsiftError;
use crate::pipeline::{PipelineOptions, RunMode};

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Whether the event correlator runs.
    pub mode: RunMode,
    /// Print the whole result as JSON.
    pub json_output: bool,
    /// Prefix text lines with their line number.
    pub line_numbers: bool,
    /// Emit debug logging to stderr.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            mode: RunMode::Development,
            json_output: false,
            line_numbers: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// An explicitly passed `--config` path must exist; the default path is
    /// optional.
    pub fn from_cli(cli: &Cli) -> Result<Self, LogsiftError> {
        let mut config = Self::default();

        match cli.config {
            Some(ref path) => config.apply_file_config(FileConfig::load(path)?),
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    config.apply_file_config(FileConfig::load(&path)?);
                }
            }
        }

        // CLI overrides
        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if cli.production {
            config.mode = RunMode::Production;
        }
        if cli.line_numbers {
            config.line_numbers = true;
        }
        config.json_output = cli.json;
        config.verbose = cli.verbose;

        Ok(config)
    }

    pub const fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions { mode: self.mode }
    }

    /// Default config file path: `$XDG_CONFIG_HOME/logsift/config.toml` or `~/.config/logsift/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("logsift").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("logsift")
                .join("config.toml")
        } else {
            PathBuf::from(".config/logsift/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(mode) = file.mode {
            self.mode = mode;
        }

        if let Some(line_numbers) = file.line_numbers {
            self.line_numbers = line_numbers;
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<String>,
    mode: Option<RunMode>,
    line_numbers: Option<bool>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, LogsiftError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LogsiftError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
