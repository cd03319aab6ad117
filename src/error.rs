// src/error.rs

//! Error types for confport

use thiserror::Error;

/// Errors that can occur during configuration replication
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying SQLite storage failure; always fatal to the run
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// I/O error (style sheet copy, database path creation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The correlator has no destination row for a source entity.
    ///
    /// Raised when an assignment references an item that was never
    /// replicated (usually because it had no setting for the destination
    /// locale). Callers skip the affected assignment rather than abort.
    #[error("No destination {entity} correlates with source key '{key}'")]
    CorrelationNotFound { entity: &'static str, key: String },

    /// Setup or initialization problem
    #[error("Initialization error: {0}")]
    InitError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
