// src/cli.rs

//! CLI definitions for confport
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Default location of the confport database
pub const DEFAULT_DB_PATH: &str = "/var/lib/confport/confport.db";

#[derive(Parser)]
#[command(name = "confport")]
#[command(author, version)]
#[command(about = "Replicates administrative configuration between scopes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the confport database
    Init {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Import configuration from a source scope into a destination journal
    Import {
        /// Source scope id (0 = site, >0 = journal)
        source_scope: i64,

        /// Destination journal scope id
        dest_scope: i64,

        /// Destination locale (e.g. en_US)
        locale: String,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,

        /// Root of the public files directory (uploaded style sheets)
        #[arg(long, default_value = "public")]
        public_dir: String,

        /// Skip the appearance settings copy
        #[arg(long)]
        skip_appearance: bool,

        /// Skip the plugin settings copy
        #[arg(long)]
        skip_plugins: bool,

        /// Skip the navigation menu replication
        #[arg(long)]
        skip_navigation: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
