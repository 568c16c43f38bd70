//! Configuration file loading and resolved run settings.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults ([`HarvestConfig::default`])
//! 2. an optional TOML file ([`FileConfig`])
//! 3. command-line flags (applied by the binary)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::download::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DIRECT_TIMEOUT_SECS};
use crate::fallback::{DEFAULT_TOOL_LABEL, DEFAULT_TOOL_PROGRAM};
use crate::scholar::DEFAULT_SEARCH_URL;

const CONFIG_DIR_NAME: &str = "scholar-harvest";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its accepted range.
    #[error("invalid config value for `{field}`: {value}. Expected {expected}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Offending value, rendered.
        value: String,
        /// Accepted range or constraint.
        expected: &'static str,
    },
}

/// TOML-backed file configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Base directory for run folders.
    pub output_dir: Option<PathBuf>,
    /// Search endpoint URL.
    pub search_url: Option<String>,
    /// Fallback tool program.
    pub tool_program: Option<String>,
    /// Label written to the success log for tool acquisitions.
    pub tool_label: Option<String>,
    /// Lower bound of the courtesy delay, in milliseconds.
    pub min_delay_ms: Option<u64>,
    /// Upper bound of the courtesy delay, in milliseconds.
    pub max_delay_ms: Option<u64>,
    /// Direct download timeout in seconds.
    pub download_timeout_secs: Option<u64>,
    /// Whether written files must carry the PDF signature.
    pub verify_signature: Option<bool>,
}

impl FileConfig {
    /// Parses a config from TOML text. Does not validate.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for bad syntax, wrong types, or unknown keys.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Validates config values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout) = self.download_timeout_secs
            && !(1..=3600).contains(&timeout)
        {
            return Err(ConfigError::Invalid {
                field: "download_timeout_secs",
                value: timeout.to_string(),
                expected: "range 1..=3600",
            });
        }

        let min = self.min_delay_ms.unwrap_or(duration_ms(DEFAULT_MIN_DELAY));
        let max = self.max_delay_ms.unwrap_or(duration_ms(DEFAULT_MAX_DELAY));
        if min > max {
            return Err(ConfigError::Invalid {
                field: "min_delay_ms",
                value: min.to_string(),
                expected: "a value not above max_delay_ms",
            });
        }

        for (field, value) in [
            ("search_url", self.search_url.as_deref()),
            ("tool_program", self.tool_program.as_deref()),
            ("tool_label", self.tool_label.as_deref()),
        ] {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::Invalid {
                    field,
                    value: "\"\"".to_string(),
                    expected: "a non-empty string",
                });
            }
        }

        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Base directory for run folders.
    pub output_dir: PathBuf,
    /// Search endpoint URL.
    pub search_url: String,
    /// Fallback tool program.
    pub tool_program: String,
    /// Label written to the success log for tool acquisitions.
    pub tool_label: String,
    /// Lower bound of the courtesy delay.
    pub min_delay: Duration,
    /// Upper bound of the courtesy delay.
    pub max_delay: Duration,
    /// Direct download timeout.
    pub download_timeout: Duration,
    /// Whether written files must carry the PDF signature.
    pub verify_signature: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            tool_program: DEFAULT_TOOL_PROGRAM.to_string(),
            tool_label: DEFAULT_TOOL_LABEL.to_string(),
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            download_timeout: Duration::from_secs(DIRECT_TIMEOUT_SECS),
            verify_signature: true,
        }
    }
}

impl HarvestConfig {
    /// Overlays the keys present in `file` onto these settings.
    #[must_use]
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(output_dir) = &file.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(search_url) = &file.search_url {
            self.search_url.clone_from(search_url);
        }
        if let Some(tool_program) = &file.tool_program {
            self.tool_program.clone_from(tool_program);
        }
        if let Some(tool_label) = &file.tool_label {
            self.tool_label.clone_from(tool_label);
        }
        if let Some(min) = file.min_delay_ms {
            self.min_delay = Duration::from_millis(min);
        }
        if let Some(max) = file.max_delay_ms {
            self.max_delay = Duration::from_millis(max);
        }
        if let Some(timeout) = file.download_timeout_secs {
            self.download_timeout = Duration::from_secs(timeout);
        }
        if let Some(verify) = file.verify_signature {
            self.verify_signature = verify;
        }
        self
    }
}

/// Result of looking for a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// Path that was consulted, if one could be resolved.
    pub path: Option<PathBuf>,
    /// Parsed and validated file config, when the file existed.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/scholar-harvest/config.toml`
/// 2. `$HOME/.config/scholar-harvest/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if a file is present there.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read, parsed,
/// or validated.
pub fn load_default_file_config() -> Result<LoadedConfig, ConfigError> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

/// Reads, parses and validates the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or validated.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = FileConfig::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    debug!(path = %path.display(), "config file loaded");
    Ok(config)
}
