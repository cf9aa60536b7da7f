//! TOML configuration file parsing and loading
//!
//! Settings are layered: built-in defaults, then the configuration file, then
//! command-line flags. The file is `--config-file` if given, otherwise
//! `<config dir>/Reposcan/reposcan.toml` when it exists.

use super::args::Args;
use crate::core::retry::RetryPolicy;
use crate::core::validation::{validate_api_url, ValidationError};
use crate::scanner::api::{ScanSettings, DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Error in configuration file validation {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },

    #[error(transparent)]
    Argument(#[from] ValidationError),
}

/// Effective runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub api_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub walk_concurrency: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: ScanSettings::default().page_size,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            max_retries: retry.max_retries,
            retry_delay_ms: retry.base_delay.as_millis() as u64,
            walk_concurrency: None,
            log_level: None,
            log_format: None,
            log_file: None,
            color: None,
        }
    }
}

impl ScanConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Reposcan").join("reposcan.toml"))
    }

    /// Defaults overlaid with the configuration file, if any
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match config_file {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };

        let mut config = Self::default();
        if let Some(path) = config_path {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
            let table = toml::from_str::<toml::Table>(&contents).map_err(|source| {
                ConfigError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;
            config
                .apply_toml_values(&table)
                .map_err(|source| ConfigError::Invalid { path, source })?;
        }
        Ok(config)
    }

    /// Apply TOML configuration values; unknown keys are ignored
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ValidationError> {
        if let Some(api_url) = string_value(config, "api-url")? {
            self.api_url = validate_api_url(&api_url)?;
        }
        if let Some(page_size) = integer_value(config, "page-size", 1, 100)? {
            self.page_size = page_size as u32;
        }
        if let Some(timeout) = integer_value(config, "timeout-secs", 1, i64::MAX)? {
            self.timeout_secs = timeout as u64;
        }
        if let Some(retries) = integer_value(config, "max-retries", 0, i64::MAX)? {
            self.max_retries = retries as usize;
        }
        if let Some(delay) = integer_value(config, "retry-delay-ms", 1, i64::MAX)? {
            self.retry_delay_ms = delay as u64;
        }
        if let Some(limit) = integer_value(config, "walk-concurrency", 1, i64::MAX)? {
            self.walk_concurrency = Some(limit as usize);
        }
        if let Some(log_level) = string_value(config, "log-level")? {
            self.log_level = Some(log_level);
        }
        if let Some(log_format) = string_value(config, "log-format")? {
            if !matches!(log_format.as_str(), "text" | "ext" | "json") {
                return Err(ValidationError::new(&format!(
                    "log-format must be one of text, ext, json: {}",
                    log_format
                )));
            }
            self.log_format = Some(log_format);
        }
        if let Some(log_file) = string_value(config, "log-file")? {
            if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                self.log_file = None; // Magic values "none" and "-" disable file logging
            } else {
                self.log_file = Some(PathBuf::from(log_file));
            }
        }
        if let Some(color) = config.get("color") {
            self.color = Some(
                color
                    .as_bool()
                    .ok_or_else(|| ValidationError::new("color must be true or false"))?,
            );
        }
        Ok(())
    }

    /// Command-line values take precedence over the file
    pub fn apply_args(&mut self, args: &Args) -> Result<(), ValidationError> {
        if let Some(api_url) = &args.api_url {
            self.api_url = validate_api_url(api_url)?;
        }
        if let Some(page_size) = args.page_size {
            self.page_size = page_size;
        }
        if let Some(limit) = args.walk_concurrency {
            self.walk_concurrency = Some(limit);
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = Some(log_level.clone());
        }
        if let Some(log_format) = &args.log_format {
            self.log_format = Some(log_format.clone());
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(color) = args.color_override() {
            self.color = Some(color);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            page_size: self.page_size,
            walk_concurrency: self.walk_concurrency,
        }
    }
}

fn string_value(config: &toml::Table, key: &str) -> Result<Option<String>, ValidationError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ValidationError::new(&format!("{} must be a string", key))),
    }
}

fn integer_value(
    config: &toml::Table,
    key: &str,
    min: i64,
    max: i64,
) -> Result<Option<i64>, ValidationError> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };
    match value.as_integer() {
        Some(n) if (min..=max).contains(&n) => Ok(Some(n)),
        Some(n) if max == i64::MAX => Err(ValidationError::new(&format!(
            "{} must be at least {}, got {}",
            key, min, n
        ))),
        Some(n) => Err(ValidationError::new(&format!(
            "{} must be between {} and {}, got {}",
            key, min, max, n
        ))),
        None => Err(ValidationError::new(&format!("{} must be an integer", key))),
    }
}
