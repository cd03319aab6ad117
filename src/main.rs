// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { db_path }) => commands::init(&db_path),
        Some(Commands::Import {
            source_scope,
            dest_scope,
            locale,
            db_path,
            public_dir,
            skip_appearance,
            skip_plugins,
            skip_navigation,
        }) => commands::import(
            source_scope,
            dest_scope,
            &locale,
            &commands::ImportOptions {
                db_path: &db_path,
                public_dir: Path::new(&public_dir),
                skip_appearance,
                skip_plugins,
                skip_navigation,
            },
        ),
        Some(Commands::Completions { shell }) => {
            commands::completions(shell);
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("confport v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'confport --help' for usage information");
            Ok(())
        }
    }
}
