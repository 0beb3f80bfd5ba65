use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use dispatch::{LocalCommand, LocalDispatch, RemoteCommand, RemoteDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "kind": error_kind(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    match RemoteDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx).await,
        None => Err(CommandError::Config(format!(
            "unhandled command: {:?}",
            cli.command
        ))),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Search(_) => "SEARCH_ERROR",
        CommandError::PageOutOfRange { .. } => "PAGE_ERROR",
        CommandError::Api(_) => "API_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the search error kind, if the error has one.
fn error_kind(e: &CommandError) -> Option<String> {
    match e {
        CommandError::Filter(f) => Some(f.kind().to_string()),
        CommandError::Search(s) => Some(s.kind().to_string()),
        _ => None,
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Config(_) => 5,
        CommandError::Filter(_) => 1,
        CommandError::PageOutOfRange { .. } => 1,
        CommandError::Search(_) => 2,
        CommandError::Api(sortinghat_api_rs::error::Error::InvalidEndpoint { .. }) => 5,
        CommandError::Api(_) => 2,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}
