// src/db/models/item_setting.rs

//! Navigation menu item setting model
//!
//! Settings are locale-aware attributes of an item (title, content,
//! remote URL, ...). A setting row stored with no locale applies across
//! all locales; `titleLocaleKey` is the canonical example, since it names
//! a translation key rather than literal text.

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// A locale-aware or global attribute of a navigation item
#[derive(Debug, Clone)]
pub struct ItemSetting {
    pub item_id: i64,
    pub setting_name: String,
    pub setting_value: String,
    pub setting_type: String,
    /// None = applies across all locales
    pub locale: Option<String>,
}

impl ItemSetting {
    /// Insert or update a setting keyed by (item_id, setting_name, locale).
    ///
    /// The locale is stored as an empty string when absent so the unique
    /// key stays enforceable (SQLite treats NULLs as distinct in UNIQUE
    /// constraints).
    pub fn upsert(
        conn: &Connection,
        item_id: i64,
        name: &str,
        value: &str,
        setting_type: &str,
        locale: Option<&str>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO navigation_menu_item_settings
                 (item_id, setting_name, setting_value, setting_type, locale)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(item_id, setting_name, locale)
             DO UPDATE SET setting_value = excluded.setting_value,
                           setting_type = excluded.setting_type",
            params![item_id, name, value, setting_type, locale.unwrap_or("")],
        )?;
        Ok(())
    }

    /// List every setting attached to an item
    pub fn list_for_item(conn: &Connection, item_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT item_id, setting_name, setting_value, setting_type, locale
             FROM navigation_menu_item_settings WHERE item_id = ?1
             ORDER BY setting_name, locale",
        )?;

        let settings = stmt
            .query_map([item_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(settings)
    }

    /// List an item's settings visible in a given locale: rows tagged with
    /// exactly that locale plus rows that apply across all locales.
    pub fn list_for_item_locale(
        conn: &Connection,
        item_id: i64,
        locale: &str,
    ) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT item_id, setting_name, setting_value, setting_type, locale
             FROM navigation_menu_item_settings
             WHERE item_id = ?1 AND (locale = ?2 OR locale = '')
             ORDER BY setting_name, locale",
        )?;

        let settings = stmt
            .query_map(params![item_id, locale], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(settings)
    }

    /// Whether the item has at least one setting tagged with the locale.
    ///
    /// This is the inclusion predicate for replication: an item with no
    /// content in the destination locale is not meaningful to show there.
    pub fn has_locale(conn: &Connection, item_id: i64, locale: &str) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                 SELECT 1 FROM navigation_menu_item_settings
                 WHERE item_id = ?1 AND locale = ?2
             )",
            params![item_id, locale],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Delete the settings of every item belonging to a scope
    pub fn delete_for_scope(conn: &Connection, scope_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM navigation_menu_item_settings
             WHERE item_id IN (SELECT id FROM navigation_menu_items WHERE scope_id = ?1)",
            [scope_id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let locale: String = row.get(4)?;
        Ok(Self {
            item_id: row.get(0)?,
            setting_name: row.get(1)?,
            setting_value: row.get(2)?,
            setting_type: row.get(3)?,
            locale: if locale.is_empty() { None } else { Some(locale) },
        })
    }
}
