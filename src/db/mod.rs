// src/db/mod.rs

//! Database connection management
//!
//! All confport state lives in a single SQLite database. This module
//! provides the `init`/`open`/`transaction` helpers the rest of the crate
//! builds on.

pub mod models;
pub mod schema;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Initialize the database at the given path, creating parent directories
/// and applying all pending migrations.
pub fn init(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Open an existing database, applying any pending migrations.
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Run a closure inside a single transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err`. An import
/// run is wrapped in one of these so a mid-run storage failure leaves the
/// destination scope in its pre-import state.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&rusqlite::Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            debug!("Rolling back transaction: {}", e);
            tx.rollback()?;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_init_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir
            .path()
            .join("nested/path/confport.db")
            .to_str()
            .unwrap()
            .to_string();

        init(&db_path).unwrap();
        assert!(std::path::Path::new(&db_path).exists());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();
        drop(temp_file);

        init(&db_path).unwrap();
        let mut conn = open(&db_path).unwrap();

        let result: Result<()> = transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (1, 'primary', 'Primary')",
                [],
            )?;
            Err(crate::error::Error::InitError("forced failure".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM navigation_menus", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "Rolled-back insert should not be visible");
    }

    #[test]
    fn test_transaction_commits_on_success() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();
        drop(temp_file);

        init(&db_path).unwrap();
        let mut conn = open(&db_path).unwrap();

        transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (1, 'primary', 'Primary')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM navigation_menus", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
