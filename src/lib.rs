// src/lib.rs

//! confport
//!
//! Replicates administrative configuration from one organizational scope
//! (the site, or a specific journal) into another journal: display
//! preferences, plugin settings, and hierarchical navigation menus.
//!
//! # Architecture
//!
//! - Database-first: all configuration rows live in SQLite
//! - Explicit stores: the replication core is handed `ScopeStore` /
//!   `NavigationStore` implementations, never ambient global state
//! - Keyed correlation: source and destination entities are paired by
//!   natural key, since surrogate ids are never portable across scopes
//! - Import is a replace: the destination scope is reset, then rebuilt
//!   inside a single transaction

pub mod appearance;
pub mod db;
mod error;
pub mod plugins;
pub mod replicate;
pub mod store;

pub use error::{Error, Result};
pub use replicate::{ReplicationReport, Replicator, TITLE_LOCALE_KEY};
pub use store::{NavigationStore, ScopeStore, SqliteStore};
