// src/db/schema.rs

//! Database schema definitions and migrations for confport
//!
//! This module defines the SQLite schema for all core tables and provides
//! a migration system to evolve the schema over time.

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    // Apply migrations in order
    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(conn, version)?;
        set_schema_version(conn, version)?;
    }

    info!(
        "Schema migration complete. Now at version {}",
        SCHEMA_VERSION
    );
    Ok(())
}

/// Apply a specific migration version
fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(crate::error::Error::InitError(format!(
            "Unknown migration version: {}",
            version
        ))),
    }
}

/// Initial schema - Version 1
///
/// Creates all core tables for confport:
/// - scope_settings: Flat per-scope key/value configuration
/// - plugin_settings: Per-scope plugin key/value configuration
/// - navigation_menus: Named menu slots within a scope
/// - navigation_menu_items: Reusable navigation entries within a scope
/// - navigation_menu_item_settings: Locale-aware item attributes
/// - navigation_menu_item_assignments: Item placements forming the menu forest
///
/// Scope id 0 is the site; positive scope ids are journals. Surrogate ids
/// are scope-local and never portable across scopes; the `UNIQUE` natural
/// keys below are what identify an entity across scopes.
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Flat scope-level configuration (sidebar, theme, style sheet, ...)
        CREATE TABLE scope_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope_id INTEGER NOT NULL,
            setting_name TEXT NOT NULL,
            setting_value TEXT NOT NULL,
            setting_type TEXT NOT NULL DEFAULT 'string',
            UNIQUE(scope_id, setting_name)
        );

        CREATE INDEX idx_scope_settings_scope ON scope_settings(scope_id);

        -- Plugin settings, keyed by scope and plugin
        CREATE TABLE plugin_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope_id INTEGER NOT NULL,
            plugin_name TEXT NOT NULL,
            setting_name TEXT NOT NULL,
            setting_value TEXT NOT NULL,
            UNIQUE(scope_id, plugin_name, setting_name)
        );

        CREATE INDEX idx_plugin_settings_scope_plugin ON plugin_settings(scope_id, plugin_name);

        -- Menus: a named slot (e.g. 'primary') within a scope
        CREATE TABLE navigation_menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope_id INTEGER NOT NULL,
            area_name TEXT NOT NULL,
            title TEXT NOT NULL,
            UNIQUE(scope_id, area_name)
        );

        CREATE INDEX idx_navigation_menus_scope ON navigation_menus(scope_id);

        -- Items: reusable navigation entries within a scope
        CREATE TABLE navigation_menu_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope_id INTEGER NOT NULL,
            path TEXT NOT NULL,
            item_type TEXT NOT NULL,
            UNIQUE(scope_id, path, item_type)
        );

        CREATE INDEX idx_navigation_menu_items_scope ON navigation_menu_items(scope_id);

        -- Item settings: locale-aware attributes of an item.
        -- locale = '' means the setting applies across all locales.
        CREATE TABLE navigation_menu_item_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id INTEGER NOT NULL,
            setting_name TEXT NOT NULL,
            setting_value TEXT NOT NULL,
            setting_type TEXT NOT NULL DEFAULT 'string',
            locale TEXT NOT NULL DEFAULT '',
            UNIQUE(item_id, setting_name, locale),
            FOREIGN KEY (item_id) REFERENCES navigation_menu_items(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_nav_item_settings_item ON navigation_menu_item_settings(item_id);

        -- Assignments: placement of an item in a menu.
        -- parent_item_id = 0 means top level; a non-zero parent must itself
        -- be assigned to the same menu. seq orders siblings only.
        CREATE TABLE navigation_menu_item_assignments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            menu_id INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            parent_item_id INTEGER NOT NULL DEFAULT 0,
            seq INTEGER NOT NULL DEFAULT 0,
            UNIQUE(menu_id, item_id),
            FOREIGN KEY (menu_id) REFERENCES navigation_menus(id) ON DELETE CASCADE,
            FOREIGN KEY (item_id) REFERENCES navigation_menu_items(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_nav_assignments_menu ON navigation_menu_item_assignments(menu_id);
        ",
    )?;

    debug!("Schema version 1 created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp_file.path()).unwrap();
        (temp_file, conn)
    }

    #[test]
    fn test_schema_version_tracking() {
        let (_temp, conn) = create_test_db();

        // Initial version should be 0
        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        // Set version to 1
        set_schema_version(&conn, 1).unwrap();
        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_migrate_creates_all_tables() {
        let (_temp, conn) = create_test_db();

        migrate(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"scope_settings".to_string()));
        assert!(tables.contains(&"plugin_settings".to_string()));
        assert!(tables.contains(&"navigation_menus".to_string()));
        assert!(tables.contains(&"navigation_menu_items".to_string()));
        assert!(tables.contains(&"navigation_menu_item_settings".to_string()));
        assert!(tables.contains(&"navigation_menu_item_assignments".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let (_temp, conn) = create_test_db();

        migrate(&conn).unwrap();
        let version1 = get_schema_version(&conn).unwrap();

        migrate(&conn).unwrap();
        let version2 = get_schema_version(&conn).unwrap();

        assert_eq!(version1, version2);
        assert_eq!(version1, SCHEMA_VERSION);
    }

    #[test]
    fn test_menu_natural_key_constraint() {
        let (_temp, conn) = create_test_db();
        migrate(&conn).unwrap();

        conn.execute(
            "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (1, 'primary', 'Primary')",
            [],
        )
        .unwrap();

        // Same natural key in the same scope - should fail
        let result = conn.execute(
            "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (1, 'primary', 'Other')",
            [],
        );
        assert!(result.is_err());

        // Same area name in a different scope is fine
        conn.execute(
            "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (2, 'primary', 'Primary')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_item_setting_cascade_delete() {
        let (_temp, conn) = create_test_db();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
        migrate(&conn).unwrap();

        conn.execute(
            "INSERT INTO navigation_menu_items (scope_id, path, item_type) VALUES (1, '/about', 'page')",
            [],
        )
        .unwrap();
        let item_id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO navigation_menu_item_settings (item_id, setting_name, setting_value, locale)
             VALUES (?1, 'title', 'About', 'en')",
            [item_id],
        )
        .unwrap();

        conn.execute("DELETE FROM navigation_menu_items WHERE id = ?1", [item_id])
            .unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM navigation_menu_item_settings WHERE item_id = ?1",
                [item_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0, "Item settings should cascade on item delete");
    }
}
