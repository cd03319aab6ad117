// src/db/models/item.rs

//! Navigation menu item model
//!
//! An item is a reusable navigation entry within a scope. The natural key
//! is (scope_id, path, item_type); the surrogate id is scope-local.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A reusable navigation entry within a scope
#[derive(Debug, Clone)]
pub struct Item {
    pub id: i64,
    pub scope_id: i64,
    pub path: String,
    pub item_type: String,
}

impl Item {
    /// Insert or update an item keyed by (scope_id, path, item_type).
    ///
    /// The surrogate id is preserved on conflict, so settings and
    /// assignments referencing it stay valid across re-runs. Returns the
    /// item's id.
    pub fn upsert(conn: &Connection, scope_id: i64, path: &str, item_type: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO navigation_menu_items (scope_id, path, item_type) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, path, item_type) DO NOTHING",
            params![scope_id, path, item_type],
        )?;

        let id = conn.query_row(
            "SELECT id FROM navigation_menu_items WHERE scope_id = ?1 AND path = ?2 AND item_type = ?3",
            params![scope_id, path, item_type],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Find an item by its natural key
    pub fn find_by_key(
        conn: &Connection,
        scope_id: i64,
        path: &str,
        item_type: &str,
    ) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, scope_id, path, item_type FROM navigation_menu_items
             WHERE scope_id = ?1 AND path = ?2 AND item_type = ?3",
        )?;

        let item = stmt
            .query_row(params![scope_id, path, item_type], Self::from_row)
            .optional()?;

        Ok(item)
    }

    /// List all items belonging to a scope
    pub fn list_for_scope(conn: &Connection, scope_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, scope_id, path, item_type FROM navigation_menu_items
             WHERE scope_id = ?1 ORDER BY path, item_type",
        )?;

        let items = stmt
            .query_map([scope_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Delete every item belonging to a scope
    pub fn delete_for_scope(conn: &Connection, scope_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM navigation_menu_items WHERE scope_id = ?1",
            [scope_id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            scope_id: row.get(1)?,
            path: row.get(2)?,
            item_type: row.get(3)?,
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

        let id1 = Item::upsert(&conn, 1, "/about", "page").unwrap();
        let id2 = Item::upsert(&conn, 1, "/about", "page").unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_natural_key_includes_type() {
        let (_temp, conn) = create_test_db();

        let page_id = Item::upsert(&conn, 1, "/about", "page").unwrap();
        let link_id = Item::upsert(&conn, 1, "/about", "remote_url").unwrap();
        assert_ne!(page_id, link_id, "Same path, different type is a distinct item");

        assert_eq!(Item::list_for_scope(&conn, 1).unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_key() {
        let (_temp, conn) = create_test_db();

        Item::upsert(&conn, 1, "/about", "page").unwrap();

        let found = Item::find_by_key(&conn, 1, "/about", "page").unwrap();
        assert!(found.is_some());

        let missing = Item::find_by_key(&conn, 2, "/about", "page").unwrap();
        assert!(missing.is_none(), "Items are scoped");
    }

    #[test]
    fn test_delete_for_scope() {
        let (_temp, conn) = create_test_db();

        Item::upsert(&conn, 1, "/about", "page").unwrap();
        Item::upsert(&conn, 2, "/about", "page").unwrap();

        Item::delete_for_scope(&conn, 1).unwrap();

        assert!(Item::list_for_scope(&conn, 1).unwrap().is_empty());
        assert_eq!(Item::list_for_scope(&conn, 2).unwrap().len(), 1);
    }
}
