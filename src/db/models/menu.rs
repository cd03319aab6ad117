// src/db/models/menu.rs

//! Navigation menu model
//!
//! A menu is a named slot within a scope (e.g. "primary", "user"). The
//! natural key is (scope_id, area_name); the surrogate id is scope-local.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A named menu slot within a scope
#[derive(Debug, Clone)]
pub struct Menu {
    pub id: i64,
    pub scope_id: i64,
    pub area_name: String,
    pub title: String,
}

impl Menu {
    /// Insert or update a menu keyed by (scope_id, area_name).
    ///
    /// Last write wins on the title; the surrogate id is preserved on
    /// conflict. Returns the menu's id.
    pub fn upsert(conn: &Connection, scope_id: i64, area_name: &str, title: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO navigation_menus (scope_id, area_name, title) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, area_name) DO UPDATE SET title = excluded.title",
            params![scope_id, area_name, title],
        )?;

        let id = conn.query_row(
            "SELECT id FROM navigation_menus WHERE scope_id = ?1 AND area_name = ?2",
            params![scope_id, area_name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Find a menu by its natural key
    pub fn find_by_area(conn: &Connection, scope_id: i64, area_name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, scope_id, area_name, title FROM navigation_menus
             WHERE scope_id = ?1 AND area_name = ?2",
        )?;

        let menu = stmt
            .query_row(params![scope_id, area_name], Self::from_row)
            .optional()?;

        Ok(menu)
    }

    /// List all menus belonging to a scope
    pub fn list_for_scope(conn: &Connection, scope_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, scope_id, area_name, title FROM navigation_menus
             WHERE scope_id = ?1 ORDER BY area_name",
        )?;

        let menus = stmt
            .query_map([scope_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(menus)
    }

    /// Delete every menu belonging to a scope
    pub fn delete_for_scope(conn: &Connection, scope_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM navigation_menus WHERE scope_id = ?1",
            [scope_id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            scope_id: row.get(1)?,
            area_name: row.get(2)?,
            title: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_util::create_test_db;

    #[test]
    fn test_upsert_preserves_id() {
        let (_temp, conn) = create_test_db();

        let id1 = Menu::upsert(&conn, 1, "primary", "Primary").unwrap();
        let id2 = Menu::upsert(&conn, 1, "primary", "Main Navigation").unwrap();
        assert_eq!(id1, id2, "Upsert on the same natural key keeps the id");

        let menu = Menu::find_by_area(&conn, 1, "primary").unwrap().unwrap();
        assert_eq!(menu.title, "Main Navigation");
    }

    #[test]
    fn test_same_area_in_different_scopes() {
        let (_temp, conn) = create_test_db();

        let site_id = Menu::upsert(&conn, 0, "primary", "Primary").unwrap();
        let journal_id = Menu::upsert(&conn, 3, "primary", "Primary").unwrap();
        assert_ne!(site_id, journal_id);

        assert_eq!(Menu::list_for_scope(&conn, 0).unwrap().len(), 1);
        assert_eq!(Menu::list_for_scope(&conn, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_for_scope() {
        let (_temp, conn) = create_test_db();

        Menu::upsert(&conn, 1, "primary", "Primary").unwrap();
        Menu::upsert(&conn, 1, "user", "User").unwrap();
        Menu::upsert(&conn, 2, "primary", "Primary").unwrap();

        Menu::delete_for_scope(&conn, 1).unwrap();

        assert!(Menu::list_for_scope(&conn, 1).unwrap().is_empty());
        assert_eq!(Menu::list_for_scope(&conn, 2).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_empty_scope_is_noop() {
        let (_temp, conn) = create_test_db();
        Menu::delete_for_scope(&conn, 42).unwrap();
    }
}
