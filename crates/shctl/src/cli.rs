//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for shctl.

use clap::{Parser, Subcommand, ValueEnum};

/// shctl - search SortingHat identities from the command line
#[derive(Parser, Debug)]
#[command(name = "shctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// GraphQL endpoint (default: from config)
    #[arg(long, global = true, env = "SHCTL_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile search tokens and print the resulting filter
    #[command(alias = "c")]
    Compile {
        /// Search tokens, e.g. `term john lastUpdated '>=' 2020`
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Search individuals (or organizations)
    #[command(alias = "s")]
    Search {
        /// Search organizations instead of individuals
        #[arg(short, long)]
        organizations: bool,

        /// Page to fetch
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Entries per page (default: from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,

        /// Fetch every page
        #[arg(long, conflicts_with = "page")]
        all: bool,

        /// Search tokens
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List countries
    Countries {
        /// Fetch every page
        #[arg(long)]
        all: bool,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
