// src/replicate/mod.rs

//! Navigation replication
//!
//! Rebuilds one scope's navigation configuration (menus, items, item
//! settings, assignments) from another scope's, under freshly generated
//! surrogate ids. The run is sequenced as: scope reset, menu copy, item
//! copy, locale-scoped setting copy, assignment forest reconstruction.

mod correlate;
mod reset;
mod tree;

pub use correlate::Correlator;
pub use reset::reset_scope;
pub use tree::{TreeStats, rebuild_menu};

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::db::models::Item;
use crate::error::Result;
use crate::store::NavigationStore;

/// Setting name whose value is a translation key rather than literal
/// text; it is replicated without locale scoping.
pub const TITLE_LOCALE_KEY: &str = "titleLocaleKey";

/// Counts of what one replication run copied and dropped
#[derive(Debug, Default, Clone)]
pub struct ReplicationReport {
    pub menus: usize,
    pub items: usize,
    /// Items with no setting for the destination locale
    pub items_skipped: usize,
    pub settings: usize,
    pub assignments: usize,
    pub assignments_skipped: usize,
}

/// Sequences a full navigation replication run.
///
/// Constructed with an explicit store; never reaches into global state.
/// Callers are responsible for serializing runs against the same
/// destination scope and for wrapping the run in a transaction when
/// all-or-nothing behavior is wanted.
pub struct Replicator<'a> {
    nav: &'a dyn NavigationStore,
}

impl<'a> Replicator<'a> {
    pub fn new(nav: &'a dyn NavigationStore) -> Self {
        Self { nav }
    }

    /// Replace `dest_scope`'s navigation configuration with a copy of
    /// `source_scope`'s, narrowed to `locale`.
    pub fn replicate(
        &self,
        source_scope: i64,
        dest_scope: i64,
        locale: &str,
    ) -> Result<ReplicationReport> {
        info!(
            "Replicating navigation from scope {} into scope {} (locale {})",
            source_scope, dest_scope, locale
        );

        reset_scope(self.nav, dest_scope)?;

        let source_menus = self.nav.list_menus(source_scope)?;
        let source_items = self.nav.list_items(source_scope)?;
        if source_menus.is_empty() {
            warn!("Source scope {} has no navigation menus", source_scope);
        }
        if source_items.is_empty() {
            warn!("Source scope {} has no navigation items", source_scope);
        }

        let mut report = ReplicationReport::default();

        // Menus: upsert by natural key, last write wins on the title.
        for menu in &source_menus {
            self.nav.upsert_menu(dest_scope, &menu.area_name, &menu.title)?;
            report.menus += 1;
        }

        // Items: only those with content in the destination locale.
        let mut included: Vec<&Item> = Vec::new();
        for item in &source_items {
            if self.nav.item_has_locale(item.id, locale)? {
                self.nav.upsert_item(dest_scope, &item.path, &item.item_type)?;
                included.push(item);
                report.items += 1;
            } else {
                debug!(
                    "Item '{}' has no '{}' setting; excluded from replication",
                    item.path, locale
                );
                report.items_skipped += 1;
            }
        }

        // Correlation must happen after the destination upserts above.
        let correlator = Correlator::build(self.nav, dest_scope, &source_menus, &source_items)?;

        // Settings for each replicated item. titleLocaleKey crosses
        // locales unscoped; everything else carries exactly the
        // destination locale. Values for other locales are not copied.
        for item in &included {
            let dest_item_id = correlator.item(item)?;
            let mut title_key_copied = false;
            for setting in self.nav.list_item_settings(item.id, locale)? {
                if setting.setting_name == TITLE_LOCALE_KEY {
                    // The source may hold both an untagged and a
                    // locale-tagged row; the destination gets exactly one
                    // untagged row. The list orders the untagged row first.
                    if title_key_copied {
                        continue;
                    }
                    self.nav.upsert_item_setting(
                        dest_item_id,
                        &setting.setting_name,
                        &setting.setting_value,
                        &setting.setting_type,
                        None,
                    )?;
                    title_key_copied = true;
                    report.settings += 1;
                } else if setting.locale.as_deref() == Some(locale) {
                    self.nav.upsert_item_setting(
                        dest_item_id,
                        &setting.setting_name,
                        &setting.setting_value,
                        &setting.setting_type,
                        Some(locale),
                    )?;
                    report.settings += 1;
                } else {
                    debug!(
                        "Setting '{}' on '{}' has no '{}' value; skipped",
                        setting.setting_name, item.path, locale
                    );
                }
            }
        }

        // Assignment forest, one menu at a time.
        let items_by_id: HashMap<i64, &Item> =
            source_items.iter().map(|item| (item.id, item)).collect();
        for menu in &source_menus {
            let assignments = self.nav.list_assignments(menu.id)?;
            let stats = rebuild_menu(self.nav, &correlator, menu, &assignments, &items_by_id)?;
            report.assignments += stats.emitted;
            report.assignments_skipped += stats.skipped;
        }

        info!(
            "Replication complete: {} menus, {} items ({} excluded), {} settings, {} assignments ({} dropped)",
            report.menus,
            report.items,
            report.items_skipped,
            report.settings,
            report.assignments,
            report.assignments_skipped
        );
        Ok(report)
    }
}
