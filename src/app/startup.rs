//! Application startup
//!
//! Stage 1 resolves configuration (defaults, file, flags) and starts logging.
//! Stage 2 builds the scanner stack and runs the selected command, printing the
//! JSON document on stdout. Failures are logged and turn into exit status 1.

use super::cli::{Args, Command, ConfigError, ScanConfig};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::scanner::api::{
    AccessToken, GitHubUrls, HttpTransport, RepositoryResponse, ScanError, ScanGate, ScanResult,
    ScannerManager,
};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

/// Exit status used when the user interrupts a running command
const INTERRUPTED: u8 = 130;

/// Parse the process arguments and run
pub async fn run() -> ExitCode {
    run_with_args(Args::parse()).await
}

pub async fn run_with_args(args: Args) -> ExitCode {
    // Logging is not up yet, so configuration problems go straight to stderr
    let (config, command) = match resolve_config(&args).await {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let use_color = config
        .color
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    colored::control::set_override(use_color);

    let log_file = config
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        config.log_level.as_deref(),
        config.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::debug!("Effective configuration: {:?}", config);

    let token = match args.access_token() {
        Ok(token) => token,
        Err(e) => {
            log_error_with_context(&e, "Reading GitHub token");
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpTransport::new(config.timeout(), config.retry_policy()) {
        Ok(transport) => transport,
        Err(e) => {
            log::error!("FATAL: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let manager = ScannerManager::new(
        Arc::new(transport),
        GitHubUrls::new(&config.api_url),
        ScanGate::default(),
        config.scan_settings(),
    );

    tokio::select! {
        outcome = execute(&manager, &token, &command) => match outcome {
            Ok(document) => {
                println!("{}", document);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log_error_with_context(&e, command_title(&command));
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, abandoning {}", command_title(&command));
            ExitCode::from(INTERRUPTED)
        }
    }
}

/// Effective configuration and the validated command
async fn resolve_config(args: &Args) -> Result<(ScanConfig, Command), ConfigError> {
    let mut config = ScanConfig::load(args.config_file.as_deref()).await?;
    config.apply_args(args)?;
    let command = args.command.validated()?;
    Ok((config, command))
}

/// Run one validated command and render its result as pretty-printed JSON
pub async fn execute(
    manager: &ScannerManager,
    token: &AccessToken,
    command: &Command,
) -> ScanResult<String> {
    let document = match command {
        Command::List => {
            let list = manager.list_repositories(token).await?;
            serde_json::to_string_pretty(&list)
        }
        Command::Detail { owner, name } => {
            let detail = manager
                .get_repository_detail(token, owner, name)
                .await?;
            serde_json::to_string_pretty(&RepositoryResponse {
                repository: Some(detail),
            })
        }
    };

    document.map_err(|e| {
        log::error!("Failed to render result: {}", e);
        ScanError::Internal
    })
}

fn command_title(command: &Command) -> &'static str {
    match command {
        Command::List => "Listing repositories",
        Command::Detail { .. } => "Fetching repository detail",
    }
}
