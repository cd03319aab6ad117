// src/commands.rs

//! Command handlers for the confport CLI

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use confport::appearance::{self, AppearanceCopy};
use confport::db;
use confport::plugins;
use confport::replicate::{ReplicationReport, Replicator};
use confport::store::SqliteStore;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::Cli;

/// Initialize the database and run migrations
pub fn init(db_path: &str) -> Result<()> {
    info!("Initializing confport database at: {}", db_path);
    db::init(db_path)?;
    println!("Database initialized successfully at: {}", db_path);
    Ok(())
}

/// Options controlling an import run
pub struct ImportOptions<'a> {
    pub db_path: &'a str,
    pub public_dir: &'a Path,
    pub skip_appearance: bool,
    pub skip_plugins: bool,
    pub skip_navigation: bool,
}

struct ImportOutcome {
    appearance: Option<AppearanceCopy>,
    plugin_settings: usize,
    navigation: Option<ReplicationReport>,
}

/// Run a full import from `source_scope` into `dest_scope`.
///
/// All database writes happen inside one transaction; a storage failure
/// midway leaves the destination scope in its pre-import state. The style
/// sheet file copy runs after commit, so a rolled-back run never leaves
/// stray files behind.
pub fn import(
    source_scope: i64,
    dest_scope: i64,
    locale: &str,
    opts: &ImportOptions,
) -> Result<()> {
    if source_scope == dest_scope {
        anyhow::bail!("Source and destination scopes must differ");
    }
    if dest_scope <= 0 {
        anyhow::bail!("Destination must be a journal scope (id > 0)");
    }

    info!(
        "Importing configuration from scope {} into scope {}",
        source_scope, dest_scope
    );

    let mut conn = db::open(opts.db_path)?;

    let outcome = db::transaction(&mut conn, |tx| {
        let store = SqliteStore::new(tx);

        let appearance = if opts.skip_appearance {
            None
        } else {
            Some(appearance::copy_appearance_settings(
                &store,
                source_scope,
                dest_scope,
            )?)
        };

        let plugin_settings = if opts.skip_plugins {
            0
        } else {
            plugins::copy_plugin_settings(&store, source_scope, dest_scope, locale)?
        };

        let navigation = if opts.skip_navigation {
            None
        } else {
            Some(Replicator::new(&store).replicate(source_scope, dest_scope, locale)?)
        };

        Ok(ImportOutcome {
            appearance,
            plugin_settings,
            navigation,
        })
    })?;

    // File copies run outside the transaction, once the database changes
    // are committed.
    if let Some(upload_name) = outcome
        .appearance
        .as_ref()
        .and_then(|a| a.style_sheet.as_deref())
    {
        match appearance::copy_style_sheet(opts.public_dir, source_scope, dest_scope, upload_name) {
            Ok(dest) => println!("Copied style sheet: {}", dest.display()),
            Err(e) => warn!("Failed to copy style sheet '{}': {}", upload_name, e),
        }
    }

    println!("Import into scope {} complete", dest_scope);
    if let Some(appearance) = &outcome.appearance {
        println!("  Appearance settings: {}", appearance.settings);
    }
    if !opts.skip_plugins {
        println!("  Plugin settings: {}", outcome.plugin_settings);
    }
    if let Some(report) = &outcome.navigation {
        println!(
            "  Navigation: {} menus, {} items ({} excluded), {} settings, {} assignments ({} dropped)",
            report.menus,
            report.items,
            report.items_skipped,
            report.settings,
            report.assignments,
            report.assignments_skipped
        );
    }

    Ok(())
}

/// Print a completion script for the given shell to stdout
pub fn completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
