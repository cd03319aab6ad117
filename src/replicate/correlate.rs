// src/replicate/correlate.rs

//! Entity correlator
//!
//! Source and destination scopes assign unrelated surrogate ids to "the
//! same" logical entity, so the only sound way to pair them is by natural
//! key: (scope, area_name) for menus, (scope, path, type) for items.
//! Matching list positions across independently-ordered queries breaks as
//! soon as an excluded item shifts an index, so it is never done here.

use std::collections::HashMap;

use crate::db::models::{Item, Menu};
use crate::error::{Error, Result};
use crate::store::NavigationStore;

/// Maps source surrogate ids to destination surrogate ids.
///
/// Built after the destination upserts have run; a source entity with no
/// destination row (an item that failed the inclusion predicate) simply
/// has no mapping, and lookups for it fail with `CorrelationNotFound`.
pub struct Correlator {
    menus: HashMap<i64, i64>,
    items: HashMap<i64, i64>,
}

impl Correlator {
    /// Resolve each source entity's natural key in the destination scope.
    pub fn build(
        nav: &dyn NavigationStore,
        dest_scope: i64,
        source_menus: &[Menu],
        source_items: &[Item],
    ) -> Result<Self> {
        let mut menus = HashMap::new();
        for menu in source_menus {
            if let Some(dest) = nav.find_menu(dest_scope, &menu.area_name)? {
                menus.insert(menu.id, dest.id);
            }
        }

        let mut items = HashMap::new();
        for item in source_items {
            if let Some(dest) = nav.find_item(dest_scope, &item.path, &item.item_type)? {
                items.insert(item.id, dest.id);
            }
        }

        Ok(Self { menus, items })
    }

    /// Destination menu id for a source menu
    pub fn menu(&self, source: &Menu) -> Result<i64> {
        self.menus
            .get(&source.id)
            .copied()
            .ok_or_else(|| Error::CorrelationNotFound {
                entity: "menu",
                key: source.area_name.clone(),
            })
    }

    /// Destination item id for a source item
    pub fn item(&self, source: &Item) -> Result<i64> {
        self.items
            .get(&source.id)
            .copied()
            .ok_or_else(|| Error::CorrelationNotFound {
                entity: "item",
                key: format!("{} ({})", source.path, source.item_type),
            })
    }
}
