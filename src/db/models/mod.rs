// src/db/models/mod.rs

//! Data models for confport database entities
//!
//! One struct per table, with upsert/find/list/delete methods. Upserts are
//! keyed by each entity's natural key and keep the surrogate id stable, so
//! re-running an import is idempotent.

mod assignment;
mod item;
mod item_setting;
mod menu;
mod plugin_setting;
mod scope_setting;

pub use assignment::Assignment;
pub use item::Item;
pub use item_setting::ItemSetting;
pub use menu::Menu;
pub use plugin_setting::PluginSetting;
pub use scope_setting::ScopeSetting;

/// Scope id of the site itself; positive ids are journals.
pub const SITE_SCOPE_ID: i64 = 0;

/// Sentinel parent id for a top-level assignment.
pub const TOP_LEVEL: i64 = 0;
