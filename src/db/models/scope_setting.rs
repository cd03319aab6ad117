// src/db/models/scope_setting.rs

//! Scope-level key/value setting model
//!
//! Flat configuration rows keyed by (scope_id, setting_name). Scope 0 is
//! the site; positive scopes are journals.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A flat configuration value attached to a scope
#[derive(Debug, Clone)]
pub struct ScopeSetting {
    pub scope_id: i64,
    pub setting_name: String,
    pub setting_value: String,
    pub setting_type: String,
}

impl ScopeSetting {
    /// Insert or update a setting keyed by (scope_id, setting_name)
    pub fn upsert(
        conn: &Connection,
        scope_id: i64,
        name: &str,
        value: &str,
        setting_type: &str,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO scope_settings (scope_id, setting_name, setting_value, setting_type)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(scope_id, setting_name)
             DO UPDATE SET setting_value = excluded.setting_value,
                           setting_type = excluded.setting_type",
            params![scope_id, name, value, setting_type],
        )?;
        Ok(())
    }

    /// Find a setting by name within a scope
    pub fn find(conn: &Connection, scope_id: i64, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT scope_id, setting_name, setting_value, setting_type
             FROM scope_settings WHERE scope_id = ?1 AND setting_name = ?2",
        )?;

        let setting = stmt
            .query_row(params![scope_id, name], Self::from_row)
            .optional()?;

        Ok(setting)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            scope_id: row.get(0)?,
            setting_name: row.get(1)?,
            setting_value: row.get(2)?,
            setting_type: row.get(3)?,
        })
    }
}
