// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per flow:
// - projects: load a GitHub user's repositories and show the catalog
// - contact: send a message through the configured form endpoint
//
// Flags given here override whatever folio.toml and the environment say.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Portfolio projects and contact form from the command line",
    long_about = "folio loads a GitHub user's public repositories into a filterable project \
                  list and sends contact messages to a form-processing service."
)]
pub struct Cli {
    /// Extra configuration file, applied after ~/.config/folio/folio.toml and ./folio.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a GitHub user's projects, featured one first
    ///
    /// Example: folio projects --user octocat --language Rust
    Projects {
        /// GitHub user whose repositories to list
        #[arg(long)]
        user: Option<String>,

        /// Access token sent as a bearer token (raises the rate limit)
        #[arg(long)]
        token: Option<String>,

        /// Show only this language ("All" shows everything)
        #[arg(long, default_value = "All")]
        language: String,

        /// Drop repositories that have neither a description nor topics
        #[arg(long)]
        require_metadata: bool,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Send a message through the contact form
    ///
    /// Example: folio contact --name Ada --email ada@example.com --message "Hi!"
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Form endpoint URL, overriding contact.endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Output the final state as JSON
        #[arg(long)]
        json: bool,
    },
}
