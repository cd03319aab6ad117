// src/replicate/tree.rs

//! Tree reconstructor
//!
//! Rebuilds a menu's assignment forest in the destination scope under the
//! fresh surrogate ids the correlator resolved. Processing order is
//! topological over the parent relation: roots first, then each node's
//! children once the node itself has been emitted. Parent id values carry
//! no structural meaning, so sorting by them would not guarantee a parent
//! is processed before its child.
//!
//! A subtree rooted at an item that failed the inclusion predicate is
//! dropped entirely; so is an assignment whose parent never appears as an
//! assigned item in the same menu.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::db::models::{Assignment, Item, Menu, TOP_LEVEL};
use crate::error::{Error, Result};
use crate::replicate::Correlator;
use crate::store::NavigationStore;

/// Outcome counts for one menu's reconstruction
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeStats {
    /// Assignments written to the destination
    pub emitted: usize,
    /// Source assignments dropped (excluded item, excluded ancestor, or
    /// dangling parent)
    pub skipped: usize,
}

/// Re-create one menu's assignment forest in the destination scope.
///
/// `source_items` indexes the source scope's items by surrogate id so an
/// assignment's item and parent can be resolved without further queries.
pub fn rebuild_menu(
    nav: &dyn NavigationStore,
    correlator: &Correlator,
    source_menu: &Menu,
    assignments: &[Assignment],
    source_items: &HashMap<i64, &Item>,
) -> Result<TreeStats> {
    let mut stats = TreeStats::default();
    if assignments.is_empty() {
        return Ok(stats);
    }

    let dest_menu_id = match correlator.menu(source_menu) {
        Ok(id) => id,
        Err(Error::CorrelationNotFound { .. }) => {
            warn!(
                "Menu '{}' was not replicated; dropping its {} assignments",
                source_menu.area_name,
                assignments.len()
            );
            stats.skipped = assignments.len();
            return Ok(stats);
        }
        Err(e) => return Err(e),
    };

    // Sibling groups keyed by source parent item id, each in seq order.
    let mut children: HashMap<i64, Vec<&Assignment>> = HashMap::new();
    for assignment in assignments {
        children
            .entry(assignment.parent_item_id)
            .or_default()
            .push(assignment);
    }
    for siblings in children.values_mut() {
        siblings.sort_by_key(|a| (a.seq, a.item_id));
    }

    let mut queue: VecDeque<&Assignment> =
        children.remove(&TOP_LEVEL).unwrap_or_default().into();

    // Source item id -> destination item id, for nodes already written.
    // Children only ever enter the queue after their parent lands here.
    let mut emitted: HashMap<i64, i64> = HashMap::new();

    while let Some(assignment) = queue.pop_front() {
        let Some(item) = source_items.get(&assignment.item_id) else {
            warn!(
                "Assignment in menu '{}' references unknown item {}; skipping",
                source_menu.area_name, assignment.item_id
            );
            continue;
        };

        let dest_item_id = match correlator.item(item) {
            Ok(id) => id,
            Err(Error::CorrelationNotFound { .. }) => {
                warn!(
                    "Item '{}' was not replicated; dropping its subtree in menu '{}'",
                    item.path, source_menu.area_name
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        let dest_parent_id = if assignment.parent_item_id == TOP_LEVEL {
            TOP_LEVEL
        } else {
            match emitted.get(&assignment.parent_item_id) {
                Some(&id) => id,
                // Unreachable: only children of emitted nodes are queued
                None => {
                    warn!(
                        "Parent of '{}' not yet emitted in menu '{}'; skipping",
                        item.path, source_menu.area_name
                    );
                    continue;
                }
            }
        };

        nav.upsert_assignment(dest_menu_id, dest_item_id, dest_parent_id, assignment.seq)?;
        stats.emitted += 1;
        emitted.insert(assignment.item_id, dest_item_id);

        if let Some(siblings) = children.remove(&assignment.item_id) {
            queue.extend(siblings);
        }
    }

    stats.skipped = assignments.len() - stats.emitted;
    if stats.skipped > 0 {
        debug!(
            "Menu '{}': {} assignments dropped (excluded subtree or dangling parent)",
            source_menu.area_name, stats.skipped
        );
    }

    Ok(stats)
}
