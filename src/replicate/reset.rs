// src/replicate/reset.rs

//! Scope reset
//!
//! An import is a replace, not a merge: before repopulating, the
//! destination scope's existing navigation configuration is cleared.

use tracing::info;

use crate::error::Result;
use crate::store::NavigationStore;

/// Delete every assignment, item setting, item, and menu belonging to the
/// scope. Calling this on an empty scope is a no-op, not an error; only
/// storage failures propagate.
pub fn reset_scope(nav: &dyn NavigationStore, scope_id: i64) -> Result<()> {
    info!("Resetting navigation data in scope {}", scope_id);
    nav.delete_scope_data(scope_id)
}
