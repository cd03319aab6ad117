// src/db/models/plugin_setting.rs

//! Plugin setting model
//!
//! Key/value rows attached to a (scope, plugin) pair. Custom blocks are
//! stored as plugins too, which is why the replication fan-out in
//! `plugins.rs` can reuse these methods for block settings.

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// A plugin configuration value within a scope
#[derive(Debug, Clone)]
pub struct PluginSetting {
    pub scope_id: i64,
    pub plugin_name: String,
    pub setting_name: String,
    pub setting_value: String,
}

impl PluginSetting {
    /// Insert or update a setting keyed by (scope_id, plugin_name, setting_name)
    pub fn upsert(
        conn: &Connection,
        scope_id: i64,
        plugin_name: &str,
        name: &str,
        value: &str,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO plugin_settings (scope_id, plugin_name, setting_name, setting_value)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(scope_id, plugin_name, setting_name)
             DO UPDATE SET setting_value = excluded.setting_value",
            params![scope_id, plugin_name, name, value],
        )?;
        Ok(())
    }

    /// List every setting of a plugin within a scope
    pub fn list_for_plugin(
        conn: &Connection,
        scope_id: i64,
        plugin_name: &str,
    ) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT scope_id, plugin_name, setting_name, setting_value
             FROM plugin_settings WHERE scope_id = ?1 AND plugin_name = ?2
             ORDER BY setting_name",
        )?;

        let settings = stmt
            .query_map(params![scope_id, plugin_name], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(settings)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            scope_id: row.get(0)?,
            plugin_name: row.get(1)?,
            setting_name: row.get(2)?,
            setting_value: row.get(3)?,
        })
    }
}
