// src/store/sqlite.rs

//! SQLite-backed store implementations
//!
//! Thin delegation onto the model layer. The store borrows its connection,
//! so a caller can hand it a `rusqlite::Transaction` (which derefs to
//! `Connection`) to run a whole import inside one transaction.

use rusqlite::Connection;
use tracing::debug;

use crate::db::models::{Assignment, Item, ItemSetting, Menu, PluginSetting, ScopeSetting};
use crate::error::Result;
use crate::store::{NavigationStore, ScopeStore};

/// SQLite implementation of both store traits
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ScopeStore for SqliteStore<'_> {
    fn get_setting(&self, scope_id: i64, name: &str) -> Result<Option<ScopeSetting>> {
        ScopeSetting::find(self.conn, scope_id, name)
    }

    fn put_setting(
        &self,
        scope_id: i64,
        name: &str,
        value: &str,
        setting_type: &str,
    ) -> Result<()> {
        ScopeSetting::upsert(self.conn, scope_id, name, value, setting_type)
    }

    fn list_plugin_settings(&self, scope_id: i64, plugin_name: &str) -> Result<Vec<PluginSetting>> {
        PluginSetting::list_for_plugin(self.conn, scope_id, plugin_name)
    }

    fn put_plugin_setting(
        &self,
        scope_id: i64,
        plugin_name: &str,
        name: &str,
        value: &str,
    ) -> Result<()> {
        PluginSetting::upsert(self.conn, scope_id, plugin_name, name, value)
    }
}

impl NavigationStore for SqliteStore<'_> {
    fn list_menus(&self, scope_id: i64) -> Result<Vec<Menu>> {
        Menu::list_for_scope(self.conn, scope_id)
    }

    fn find_menu(&self, scope_id: i64, area_name: &str) -> Result<Option<Menu>> {
        Menu::find_by_area(self.conn, scope_id, area_name)
    }

    fn upsert_menu(&self, scope_id: i64, area_name: &str, title: &str) -> Result<i64> {
        Menu::upsert(self.conn, scope_id, area_name, title)
    }

    fn list_items(&self, scope_id: i64) -> Result<Vec<Item>> {
        Item::list_for_scope(self.conn, scope_id)
    }

    fn find_item(&self, scope_id: i64, path: &str, item_type: &str) -> Result<Option<Item>> {
        Item::find_by_key(self.conn, scope_id, path, item_type)
    }

    fn upsert_item(&self, scope_id: i64, path: &str, item_type: &str) -> Result<i64> {
        Item::upsert(self.conn, scope_id, path, item_type)
    }

    fn list_item_settings(&self, item_id: i64, locale: &str) -> Result<Vec<ItemSetting>> {
        ItemSetting::list_for_item_locale(self.conn, item_id, locale)
    }

    fn item_has_locale(&self, item_id: i64, locale: &str) -> Result<bool> {
        ItemSetting::has_locale(self.conn, item_id, locale)
    }

    fn upsert_item_setting(
        &self,
        item_id: i64,
        name: &str,
        value: &str,
        setting_type: &str,
        locale: Option<&str>,
    ) -> Result<()> {
        ItemSetting::upsert(self.conn, item_id, name, value, setting_type, locale)
    }

    fn list_assignments(&self, menu_id: i64) -> Result<Vec<Assignment>> {
        Assignment::list_for_menu(self.conn, menu_id)
    }

    fn upsert_assignment(
        &self,
        menu_id: i64,
        item_id: i64,
        parent_item_id: i64,
        seq: i64,
    ) -> Result<()> {
        Assignment::upsert(self.conn, menu_id, item_id, parent_item_id, seq)
    }

    fn delete_scope_data(&self, scope_id: i64) -> Result<()> {
        // Child records first: assignments and item settings reference
        // items/menus; items and menus are independent of each other.
        debug!("Clearing navigation data for scope {}", scope_id);
        Assignment::delete_for_scope(self.conn, scope_id)?;
        ItemSetting::delete_for_scope(self.conn, scope_id)?;
        Item::delete_for_scope(self.conn, scope_id)?;
        Menu::delete_for_scope(self.conn, scope_id)?;
        Ok(())
    }
}
