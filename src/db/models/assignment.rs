// src/db/models/assignment.rs

//! Navigation assignment model
//!
//! An assignment places an item inside a menu, optionally nested under a
//! parent item, at a sequence position among its siblings. The set of
//! assignments for a menu forms a forest via the parent_item_id relation.

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// Placement of an item inside a menu
#[derive(Debug, Clone)]
pub struct Assignment {
    pub menu_id: i64,
    pub item_id: i64,
    /// 0 = top level; otherwise the item id of the parent, which must be
    /// assigned to the same menu
    pub parent_item_id: i64,
    /// Sibling order among assignments sharing a parent; not globally unique
    pub seq: i64,
}

impl Assignment {
    /// Insert or update an assignment keyed by (menu_id, item_id)
    pub fn upsert(
        conn: &Connection,
        menu_id: i64,
        item_id: i64,
        parent_item_id: i64,
        seq: i64,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO navigation_menu_item_assignments (menu_id, item_id, parent_item_id, seq)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(menu_id, item_id)
             DO UPDATE SET parent_item_id = excluded.parent_item_id,
                           seq = excluded.seq",
            params![menu_id, item_id, parent_item_id, seq],
        )?;
        Ok(())
    }

    /// List every assignment in a menu
    pub fn list_for_menu(conn: &Connection, menu_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT menu_id, item_id, parent_item_id, seq
             FROM navigation_menu_item_assignments
             WHERE menu_id = ?1 ORDER BY seq, item_id",
        )?;

        let assignments = stmt
            .query_map([menu_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(assignments)
    }

    /// Delete the assignments of every menu belonging to a scope
    pub fn delete_for_scope(conn: &Connection, scope_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM navigation_menu_item_assignments
             WHERE menu_id IN (SELECT id FROM navigation_menus WHERE scope_id = ?1)",
            [scope_id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            menu_id: row.get(0)?,
            item_id: row.get(1)?,
            parent_item_id: row.get(2)?,
            seq: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_util::create_test_db;
    use crate::db::models::{Item, Menu};

    #[test]
    fn test_upsert_overwrites_placement() {
        let (_temp, conn) = create_test_db();
        let menu_id = Menu::upsert(&conn, 1, "primary", "Primary").unwrap();
        let about = Item::upsert(&conn, 1, "/about", "page").unwrap();
        let team = Item::upsert(&conn, 1, "/about/team", "page").unwrap();

        Assignment::upsert(&conn, menu_id, team, 0, 5).unwrap();
        Assignment::upsert(&conn, menu_id, team, about, 0).unwrap();

        let assignments = Assignment::list_for_menu(&conn, menu_id).unwrap();
        assert_eq!(assignments.len(), 1, "Keyed by (menu, item)");
        assert_eq!(assignments[0].parent_item_id, about);
        assert_eq!(assignments[0].seq, 0);
    }

    #[test]
    fn test_list_ordered_by_seq() {
        let (_temp, conn) = create_test_db();
        let menu_id = Menu::upsert(&conn, 1, "primary", "Primary").unwrap();
        let a = Item::upsert(&conn, 1, "/a", "page").unwrap();
        let b = Item::upsert(&conn, 1, "/b", "page").unwrap();

        Assignment::upsert(&conn, menu_id, b, 0, 1).unwrap();
        Assignment::upsert(&conn, menu_id, a, 0, 0).unwrap();

        let assignments = Assignment::list_for_menu(&conn, menu_id).unwrap();
        assert_eq!(assignments[0].item_id, a);
        assert_eq!(assignments[1].item_id, b);
    }

    #[test]
    fn test_delete_for_scope() {
        let (_temp, conn) = create_test_db();
        let menu1 = Menu::upsert(&conn, 1, "primary", "Primary").unwrap();
        let menu2 = Menu::upsert(&conn, 2, "primary", "Primary").unwrap();
        let item1 = Item::upsert(&conn, 1, "/a", "page").unwrap();
        let item2 = Item::upsert(&conn, 2, "/a", "page").unwrap();

        Assignment::upsert(&conn, menu1, item1, 0, 0).unwrap();
        Assignment::upsert(&conn, menu2, item2, 0, 0).unwrap();

        Assignment::delete_for_scope(&conn, 1).unwrap();

        assert!(Assignment::list_for_menu(&conn, menu1).unwrap().is_empty());
        assert_eq!(Assignment::list_for_menu(&conn, menu2).unwrap().len(), 1);
    }
}
