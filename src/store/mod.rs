// src/store/mod.rs

//! Storage interfaces consumed by the replication core
//!
//! The orchestrator is constructed with concrete store implementations and
//! never reaches into ambient global state. Any persistence backend can
//! participate by implementing these two traits; `SqliteStore` is the
//! shipped one.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::db::models::{Assignment, Item, ItemSetting, Menu, PluginSetting, ScopeSetting};
use crate::error::Result;

/// Key/value storage for site-level and scope-level settings
pub trait ScopeStore {
    /// Fetch a flat setting by name; `None` when the scope has no such row
    fn get_setting(&self, scope_id: i64, name: &str) -> Result<Option<ScopeSetting>>;

    /// Insert or overwrite a flat setting
    fn put_setting(&self, scope_id: i64, name: &str, value: &str, setting_type: &str)
    -> Result<()>;

    /// List every setting of a plugin within a scope; empty when absent
    fn list_plugin_settings(&self, scope_id: i64, plugin_name: &str) -> Result<Vec<PluginSetting>>;

    /// Insert or overwrite a plugin setting
    fn put_plugin_setting(
        &self,
        scope_id: i64,
        plugin_name: &str,
        name: &str,
        value: &str,
    ) -> Result<()>;
}

/// Relational storage for menus, items, item settings, and assignments
pub trait NavigationStore {
    fn list_menus(&self, scope_id: i64) -> Result<Vec<Menu>>;

    /// Look up a menu by its (scope, area_name) natural key
    fn find_menu(&self, scope_id: i64, area_name: &str) -> Result<Option<Menu>>;

    /// Upsert a menu by natural key, returning its surrogate id
    fn upsert_menu(&self, scope_id: i64, area_name: &str, title: &str) -> Result<i64>;

    fn list_items(&self, scope_id: i64) -> Result<Vec<Item>>;

    /// Look up an item by its (scope, path, type) natural key
    fn find_item(&self, scope_id: i64, path: &str, item_type: &str) -> Result<Option<Item>>;

    /// Upsert an item by natural key, returning its surrogate id
    fn upsert_item(&self, scope_id: i64, path: &str, item_type: &str) -> Result<i64>;

    /// Settings of an item visible in a locale (exact-locale plus global rows)
    fn list_item_settings(&self, item_id: i64, locale: &str) -> Result<Vec<ItemSetting>>;

    /// Inclusion predicate: does the item carry any setting for the locale?
    fn item_has_locale(&self, item_id: i64, locale: &str) -> Result<bool>;

    fn upsert_item_setting(
        &self,
        item_id: i64,
        name: &str,
        value: &str,
        setting_type: &str,
        locale: Option<&str>,
    ) -> Result<()>;

    fn list_assignments(&self, menu_id: i64) -> Result<Vec<Assignment>>;

    fn upsert_assignment(
        &self,
        menu_id: i64,
        item_id: i64,
        parent_item_id: i64,
        seq: i64,
    ) -> Result<()>;

    /// Destructively clear a scope's menus, items, settings, and
    /// assignments. Safe to call on an empty scope.
    fn delete_scope_data(&self, scope_id: i64) -> Result<()>;
}
