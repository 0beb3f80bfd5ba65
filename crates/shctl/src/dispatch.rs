//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they talk to the SortingHat server:
//! local commands never build a client, remote commands always do.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::search::SearchOptions;
use crate::commands::{self, CommandContext, CommandError, Result};
use sortinghat_api_rs::query::Collection;

/// Trait for commands that run without contacting the server.
pub trait LocalCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that query the server.
#[allow(async_fn_in_trait)]
pub trait RemoteCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Commands that don't need the network.
#[derive(Debug)]
pub enum LocalDispatch<'a> {
    Compile(&'a [String]),
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Returns None if the command needs the server.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Compile { tokens }) => Some(Self::Compile(tokens)),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Compile(tokens) => commands::compile::execute(ctx, tokens),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("shctl - SortingHat search CLI");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that query the server.
#[derive(Debug)]
pub enum RemoteDispatch {
    Search(SearchOptions),
}

impl RemoteDispatch {
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Search {
                organizations,
                page,
                page_size,
                all,
                tokens,
            }) => Some(Self::Search(SearchOptions {
                collection: if *organizations {
                    Collection::Organizations
                } else {
                    Collection::Individuals
                },
                page: *page,
                page_size: *page_size,
                all: *all,
                tokens: tokens.clone(),
            })),
            Some(Commands::Countries { all }) => {
                Some(Self::Search(SearchOptions::countries(*all)))
            }
            _ => None,
        }
    }
}

impl RemoteCommand for RemoteDispatch {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Search(opts) => commands::search::execute(ctx, opts).await,
        }
    }
}
