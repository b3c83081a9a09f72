//! Split module-bay repair.
//!
//! Some chassis report one physical slot group as two sibling containers,
//! an upper and a lower module bay, each numbering its children from 1.
//! Merging re-homes the lower bay's children under the upper bay so the
//! ordinals form one continuous sequence.

use std::collections::BTreeSet;

use sonic_autoload_types::EntityClass;
use tracing::{debug, info};

use crate::classify::Inventory;
use crate::entity::EntityRow;

const UPPER_BAY: &str = "uppermodulebay";
const LOWER_BAY: &str = "lowermodulebay";

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn has_label(row: &EntityRow, label: &str) -> bool {
    normalize(&row.vendor_type).contains(label) || normalize(&row.name).contains(label)
}

/// Merges every upper/lower bay pair found under a common parent.
///
/// Returns the number of reparented rows. Running it again is a no-op
/// because the lower bays are left without children.
pub fn merge_split_bays(inventory: &mut Inventory) -> usize {
    let parents: BTreeSet<u32> = inventory
        .entities()
        .filter(|e| e.class() == EntityClass::Container && !inventory.is_excluded(e.index))
        .filter_map(|e| e.contained_in)
        .collect();

    parents
        .into_iter()
        .map(|parent| merge_under(inventory, parent))
        .sum()
}

fn merge_under(inventory: &mut Inventory, parent: u32) -> usize {
    let mut upper = None;
    let mut lower = None;
    for child in inventory.children(parent) {
        let Some(row) = inventory.entity(child) else {
            continue;
        };
        if row.class() != EntityClass::Container {
            continue;
        }
        if has_label(row, UPPER_BAY) {
            upper = Some(child);
        } else if has_label(row, LOWER_BAY) {
            lower = Some(child);
        }
    }

    let (Some(upper), Some(lower)) = (upper, lower) else {
        return 0;
    };

    let offset = i32::try_from(inventory.children(upper).len()).unwrap_or(i32::MAX);
    let moved = inventory.children(lower);
    for child in &moved {
        if let Some(row) = inventory.entity_mut(*child) {
            let rel_pos = row.parent_rel_pos.unwrap_or_default().saturating_add(offset);
            debug!(
                "Moving entity {} from lower bay {} to upper bay {} at ordinal {}",
                child, lower, upper, rel_pos
            );
            row.contained_in = Some(upper);
            row.parent_rel_pos = Some(rel_pos);
        }
    }

    if !moved.is_empty() {
        info!(
            "Merged {} entities from lower module bay {} into {}",
            moved.len(),
            lower,
            upper
        );
    }
    moved.len()
}
