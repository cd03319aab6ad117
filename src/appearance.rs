// src/appearance.rs

//! Display configuration replication
//!
//! Copies the fixed list of appearance-related scope settings from the
//! source scope into the destination scope. The `styleSheet` setting is a
//! JSON descriptor naming an uploaded file; the file itself lives under
//! the public directory and is copied separately, after the database
//! transaction has committed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::db::models::SITE_SCOPE_ID;
use crate::error::Result;
use crate::store::ScopeStore;

/// Scope settings carried over during an import
pub const APPEARANCE_SETTINGS: &[&str] = &[
    "sidebar",
    "themePluginPath",
    "styleSheet",
    "shariffServicesSelected",
    "shariffEnableWCAG",
    "shariffOrientationSelected",
    "shariffPositionSelected",
    "shariffThemeSelected",
];

const STYLE_SHEET_SETTING: &str = "styleSheet";

/// Outcome of the settings pass, including any style sheet file that
/// still needs copying once the transaction commits
#[derive(Debug, Default)]
pub struct AppearanceCopy {
    /// Settings written to the destination scope
    pub settings: usize,
    /// Upload name of the style sheet file, when one was referenced
    pub style_sheet: Option<String>,
}

/// Copy the appearance settings from `source_scope` into `dest_scope`.
/// Settings absent at the source are logged and skipped; only storage
/// failures abort.
pub fn copy_appearance_settings(
    store: &dyn ScopeStore,
    source_scope: i64,
    dest_scope: i64,
) -> Result<AppearanceCopy> {
    let mut result = AppearanceCopy::default();

    for name in APPEARANCE_SETTINGS {
        let Some(setting) = store.get_setting(source_scope, name)? else {
            warn!("Setting '{}' not found in scope {}; skipped", name, source_scope);
            continue;
        };

        if *name == STYLE_SHEET_SETTING {
            match style_sheet_upload_name(&setting.setting_value) {
                Some(upload_name) => result.style_sheet = Some(upload_name),
                None => warn!("styleSheet value carries no uploadName; file not copied"),
            }
        }

        store.put_setting(
            dest_scope,
            name,
            &setting.setting_value,
            &setting.setting_type,
        )?;
        result.settings += 1;
    }

    Ok(result)
}

/// Stored style sheet descriptor; only the file name matters here
#[derive(Debug, Deserialize)]
struct StyleSheetDescriptor {
    #[serde(rename = "uploadName")]
    upload_name: Option<String>,
}

/// Extract the uploaded file name from a style sheet JSON descriptor
fn style_sheet_upload_name(value: &str) -> Option<String> {
    let descriptor: StyleSheetDescriptor = serde_json::from_str(value).ok()?;
    descriptor.upload_name
}

/// Public directory holding a scope's uploaded files
pub fn scope_public_dir(public_root: &Path, scope_id: i64) -> PathBuf {
    if scope_id == SITE_SCOPE_ID {
        public_root.join("site")
    } else {
        public_root.join("journals").join(scope_id.to_string())
    }
}

/// Copy the style sheet file from the source scope's public directory
/// into the destination journal's, creating the directory if needed.
pub fn copy_style_sheet(
    public_root: &Path,
    source_scope: i64,
    dest_scope: i64,
    upload_name: &str,
) -> Result<PathBuf> {
    let source = scope_public_dir(public_root, source_scope).join(upload_name);
    let dest_dir = public_root.join("journals").join(dest_scope.to_string());
    std::fs::create_dir_all(&dest_dir)?;
    let dest = dest_dir.join(upload_name);
    std::fs::copy(&source, &dest)?;
    info!("Copied style sheet to {}", dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ScopeSetting;
    use crate::db::models::test_util::create_test_db;
    use crate::store::SqliteStore;

    #[test]
    fn test_copies_known_settings_and_skips_missing() {
        let (_temp, conn) = create_test_db();
        let store = SqliteStore::new(&conn);

        ScopeSetting::upsert(&conn, 0, "sidebar", "[\"b1\"]", "object").unwrap();
        ScopeSetting::upsert(&conn, 0, "themePluginPath", "default", "string").unwrap();
        // A setting outside the roster must not travel
        ScopeSetting::upsert(&conn, 0, "contactEmail", "a@b.c", "string").unwrap();

        let result = copy_appearance_settings(&store, 0, 3).unwrap();
        assert_eq!(result.settings, 2);
        assert!(result.style_sheet.is_none());

        assert!(ScopeSetting::find(&conn, 3, "sidebar").unwrap().is_some());
        assert!(ScopeSetting::find(&conn, 3, "contactEmail").unwrap().is_none());
    }

    #[test]
    fn test_style_sheet_upload_name_extraction() {
        assert_eq!(
            style_sheet_upload_name(r#"{"uploadName":"styles.css","dateUploaded":"2024"}"#),
            Some("styles.css".to_string())
        );
        assert_eq!(style_sheet_upload_name(r#"{"other":"x"}"#), None);
        assert_eq!(style_sheet_upload_name(r#"{"uploadName":42}"#), None);
        assert_eq!(style_sheet_upload_name("not json"), None);
    }

    #[test]
    fn test_style_sheet_setting_reports_pending_file() {
        let (_temp, conn) = create_test_db();
        let store = SqliteStore::new(&conn);

        ScopeSetting::upsert(
            &conn,
            0,
            "styleSheet",
            r#"{"uploadName":"site.css"}"#,
            "object",
        )
        .unwrap();

        let result = copy_appearance_settings(&store, 0, 3).unwrap();
        assert_eq!(result.style_sheet.as_deref(), Some("site.css"));
        assert!(ScopeSetting::find(&conn, 3, "styleSheet").unwrap().is_some());
    }

    #[test]
    fn test_scope_public_dir_layout() {
        let root = Path::new("/var/www/public");
        assert_eq!(scope_public_dir(root, 0), root.join("site"));
        assert_eq!(scope_public_dir(root, 4), root.join("journals/4"));
    }

    #[test]
    fn test_copy_style_sheet_creates_destination_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let public_root = temp_dir.path();

        let site_dir = public_root.join("site");
        std::fs::create_dir_all(&site_dir).unwrap();
        std::fs::write(site_dir.join("site.css"), "body {}").unwrap();

        let dest = copy_style_sheet(public_root, 0, 9, "site.css").unwrap();
        assert_eq!(dest, public_root.join("journals/9/site.css"));
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "body {}");
    }

    #[test]
    fn test_copy_style_sheet_missing_source_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = copy_style_sheet(temp_dir.path(), 0, 9, "missing.css");
        assert!(result.is_err());
    }
}
