//! Core CLI arguments structure
//!
//! Global options come first and may also be set in the TOML configuration file;
//! command-line values always win. The subcommand selects the scan operation.

use crate::core::validation::{validate_non_empty, validate_positive_int, ValidationError};
use crate::scanner::api::AccessToken;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "reposcan")]
#[command(about = "GitHub repository metadata scanner")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// GitHub personal access token
    #[arg(
        short = 't',
        long = "token",
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Records requested per page when listing (1-100)
    #[arg(long = "page-size", value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Maximum directory listings in flight per repository walk
    #[arg(long = "walk-concurrency", value_name = "COUNT", value_parser = validate_positive_int)]
    pub walk_concurrency: Option<usize>,

    /// Force colored log output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every repository the token can see
    List,

    /// Show metadata for one repository
    Detail {
        /// Repository owner (user or organisation login)
        #[arg(long, value_name = "OWNER")]
        owner: String,

        /// Repository name
        #[arg(long, value_name = "NAME")]
        name: String,
    },
}

impl Args {
    /// `Some(true)` for --color, `Some(false)` for --no-color, `None` when unspecified
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Token from --token or GITHUB_TOKEN
    pub fn access_token(&self) -> Result<AccessToken, ValidationError> {
        let raw = self.token.as_deref().ok_or_else(|| {
            ValidationError::new("A GitHub token is required (use --token or set GITHUB_TOKEN)")
        })?;
        Ok(AccessToken::new(validate_non_empty("GitHub token", raw)?))
    }
}

impl Command {
    /// The command with a detail request's owner and name trimmed and checked
    pub fn validated(&self) -> Result<Command, ValidationError> {
        match self {
            Command::List => Ok(Command::List),
            Command::Detail { owner, name } => Ok(Command::Detail {
                owner: validate_non_empty("Repository owner", owner)?,
                name: validate_non_empty("Repository name", name)?,
            }),
        }
    }
}
