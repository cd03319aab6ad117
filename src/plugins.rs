// src/plugins.rs

//! Plugin settings replication
//!
//! Copies a fixed roster of plugin configurations from the source scope
//! into the destination scope. Custom blocks managed by the block manager
//! are stored as plugins themselves, so seeing the manager's `blocks`
//! setting triggers a fan-out copy of each named block. Block content and
//! titles are locale-keyed JSON objects and are narrowed to the single
//! destination locale on the way over.

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::ScopeStore;

/// Plugins whose settings are carried over during an import
pub const PLUGINS_TO_IMPORT: &[&str] = &[
    "customblockmanagerplugin",
    "customheaderplugin",
    "defaultchildthemeplugin",
    "viewcountermt",
    "most-read",
    "mostreadblockplugin",
    "keywordcloudblockplugin",
    "citationstylelanguageplugin",
    "citationsplugin",
    "reviewcertificateplugin",
    "pdfjsviewerplugin",
    "shariffplugin",
    "subscriptionblockplugin",
];

/// Block-manager setting holding the JSON array of custom block names
const BLOCK_LIST_SETTING: &str = "blocks";

/// Block settings stored as locale-keyed JSON objects
const LOCALIZED_BLOCK_SETTINGS: &[&str] = &["blockContent", "blockTitle"];

/// Copy every roster plugin's settings from `source_scope` into
/// `dest_scope`. Plugins absent at the source are skipped silently.
/// Returns the number of settings written.
pub fn copy_plugin_settings(
    store: &dyn ScopeStore,
    source_scope: i64,
    dest_scope: i64,
    locale: &str,
) -> Result<usize> {
    let mut copied = 0;

    for plugin in PLUGINS_TO_IMPORT {
        let settings = store.list_plugin_settings(source_scope, plugin)?;
        if settings.is_empty() {
            debug!("Plugin '{}' has no settings at the source; skipped", plugin);
            continue;
        }

        for setting in settings {
            store.put_plugin_setting(
                dest_scope,
                plugin,
                &setting.setting_name,
                &setting.setting_value,
            )?;
            copied += 1;

            if setting.setting_name == BLOCK_LIST_SETTING {
                copied +=
                    copy_custom_blocks(store, source_scope, dest_scope, locale, &setting.setting_value)?;
            }
        }
    }

    Ok(copied)
}

/// Copy each custom block named in the block manager's `blocks` list.
///
/// A block whose localized content lacks the destination locale is left
/// partially copied and the rest of its settings are dropped, since a
/// block with no content in the target locale is not meaningful to show.
fn copy_custom_blocks(
    store: &dyn ScopeStore,
    source_scope: i64,
    dest_scope: i64,
    locale: &str,
    block_list: &str,
) -> Result<usize> {
    let names: Vec<String> = match serde_json::from_str(block_list) {
        Ok(names) => names,
        Err(e) => {
            warn!("Custom block list is not a JSON array of names: {}", e);
            return Ok(0);
        }
    };

    let mut copied = 0;
    'blocks: for block in &names {
        for setting in store.list_plugin_settings(source_scope, block)? {
            let value = if LOCALIZED_BLOCK_SETTINGS.contains(&setting.setting_name.as_str()) {
                match narrow_to_locale(&setting.setting_value, locale) {
                    Ok(Some(narrowed)) => narrowed,
                    Ok(None) => {
                        warn!(
                            "Block '{}' has no '{}' value for locale '{}'; remaining block settings dropped",
                            block, setting.setting_name, locale
                        );
                        continue 'blocks;
                    }
                    Err(e) => {
                        warn!(
                            "Block '{}' setting '{}' is not a locale-keyed JSON object: {}",
                            block, setting.setting_name, e
                        );
                        continue 'blocks;
                    }
                }
            } else {
                setting.setting_value.clone()
            };

            store.put_plugin_setting(dest_scope, block, &setting.setting_name, &value)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Narrow a locale-keyed JSON object (`{"en": ..., "de": ...}`) down to
/// the single destination locale; `None` when that locale is absent.
fn narrow_to_locale(value: &str, locale: &str) -> serde_json::Result<Option<String>> {
    let parsed: serde_json::Value = serde_json::from_str(value)?;
    let Some(entry) = parsed.get(locale) else {
        return Ok(None);
    };
    let narrowed = serde_json::json!({ locale: entry });
    Ok(Some(narrowed.to_string()))
}
