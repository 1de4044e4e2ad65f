//! CLI module - Command-line interface for the Logon API
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// Logon API - records client/server logins and logoffs
#[derive(Parser)]
#[command(name = "logon-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Issue a dashboard token for an email and print it
    #[command(alias = "token")]
    IssueToken {
        /// Email the token is bound to
        email: String,
    },

    /// Print login counts per client and per server
    Stats,

    /// Validate and print the effective configuration
    CheckConfig,

    /// Create a default config.toml in the working directory
    Init,
}
