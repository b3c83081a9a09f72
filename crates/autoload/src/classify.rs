//! Entity classification and filtering.
//!
//! Turns the raw inventory and interface tables into the working
//! [`Inventory`]: classified entity rows, the exclusion set, and the
//! chassis / power-supply / module / port index lists.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use sonic_autoload_types::EntityClass;
use tracing::{debug, info, warn};

use crate::entity::{EntityRow, InterfaceRow};
use crate::table::Table;

/// Filtered, classified inventory owned by one discovery run.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Retained rows. Excluded rows stay here so that resource-id lookups
    /// can still walk through them.
    entities: BTreeMap<u32, EntityRow>,
    excluded: BTreeSet<u32>,
    chassis: Vec<u32>,
    power_supplies: Vec<u32>,
    modules: Vec<u32>,
    ports: Vec<InterfaceRow>,
}

impl Inventory {
    pub fn entity(&self, index: u32) -> Option<&EntityRow> {
        self.entities.get(&index)
    }

    pub(crate) fn entity_mut(&mut self, index: u32) -> Option<&mut EntityRow> {
        self.entities.get_mut(&index)
    }

    /// Retained rows in index order, excluded ones included.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRow> {
        self.entities.values()
    }

    pub fn is_excluded(&self, index: u32) -> bool {
        self.excluded.contains(&index)
    }

    /// Retained and not excluded.
    pub fn is_active(&self, index: u32) -> bool {
        self.entities.contains_key(&index) && !self.is_excluded(index)
    }

    pub fn excluded(&self) -> &BTreeSet<u32> {
        &self.excluded
    }

    /// Active chassis, in discovery order.
    pub fn chassis(&self) -> Vec<u32> {
        self.active(&self.chassis)
    }

    /// Position of a chassis in the discovery-ordered chassis list.
    pub fn chassis_at(&self, position: usize) -> Option<u32> {
        self.chassis.get(position).copied()
    }

    /// Active power supplies, in discovery order.
    pub fn power_supplies(&self) -> Vec<u32> {
        self.active(&self.power_supplies)
    }

    /// Active modules; empty until [`Inventory::collect_modules`] runs.
    pub fn modules(&self) -> &[u32] {
        &self.modules
    }

    /// Ports of interest from the interface table.
    pub fn ports(&self) -> &[InterfaceRow] {
        &self.ports
    }

    pub fn port(&self, index: u32) -> Option<&InterfaceRow> {
        self.ports.iter().find(|p| p.index == index)
    }

    /// Active direct children of `parent`, ordered by sibling ordinal.
    pub fn children(&self, parent: u32) -> Vec<u32> {
        let mut children: Vec<&EntityRow> = self
            .entities
            .values()
            .filter(|e| e.contained_in == Some(parent) && e.index != parent)
            .filter(|e| !self.is_excluded(e.index))
            .collect();
        children.sort_by_key(|e| (e.parent_rel_pos, e.index));
        children.into_iter().map(|e| e.index).collect()
    }

    /// The module whose name is `name` (case-insensitive), if it is in the
    /// module list.
    pub fn module_named(&self, name: &str) -> Option<u32> {
        self.modules.iter().copied().find(|m| {
            self.entity(*m)
                .is_some_and(|e| e.name.eq_ignore_ascii_case(name))
        })
    }

    /// Builds the module list from the active `module` rows.
    pub fn collect_modules(&mut self) {
        self.modules = self
            .entities
            .values()
            .filter(|e| e.class() == EntityClass::Module && !self.is_excluded(e.index))
            .map(|e| e.index)
            .collect();
        debug!("Collected {} modules", self.modules.len());
    }

    fn active(&self, list: &[u32]) -> Vec<u32> {
        list.iter()
            .copied()
            .filter(|i| self.is_active(*i))
            .collect()
    }

    /// Excludes every row whose parent is missing from the working table or
    /// itself excluded, repeating until nothing changes.
    ///
    /// Each pass visits rows in descending sibling-ordinal order. Returns the
    /// number of rows newly excluded.
    pub fn exclude_orphans(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut candidates: Vec<&EntityRow> = self
                .entities
                .values()
                .filter(|e| !self.is_excluded(e.index) && !e.is_anchor())
                .collect();
            candidates.sort_by_key(|e| (e.parent_rel_pos, e.index));

            let mut newly = Vec::new();
            for row in candidates.into_iter().rev() {
                let orphaned = match row.contained_in {
                    Some(parent) => {
                        parent == row.index
                            || !self.entities.contains_key(&parent)
                            || self.is_excluded(parent)
                            || newly.contains(&parent)
                    }
                    None => true,
                };
                if orphaned {
                    newly.push(row.index);
                }
            }

            if newly.is_empty() {
                return total;
            }
            total += newly.len();
            self.excluded.extend(newly);
        }
    }
}

fn is_blacklisted(vendor_type: &str, blacklist: &[String]) -> bool {
    let vendor_type = vendor_type.to_lowercase();
    blacklist
        .iter()
        .any(|term| vendor_type.contains(&term.to_lowercase()))
}

/// Classifies raw rows into an [`Inventory`] and runs transitive exclusion.
pub fn classify(
    entity_table: &Table,
    interface_table: &Table,
    blacklist: &[String],
    port_exclude: &Regex,
) -> Inventory {
    let mut inventory = Inventory::default();

    for (key, row) in entity_table.iter() {
        let Some(index) = key.as_index() else {
            warn!("Skipping inventory row with non-numeric key '{}'", key);
            continue;
        };
        let mut entity = EntityRow::from_row(index, row);

        if entity.parent_rel_pos.is_none() || entity.contained_in.is_none() {
            inventory.excluded.insert(index);
            continue;
        }
        if is_blacklisted(&entity.vendor_type, blacklist) {
            debug!("Entity {} excluded by vendor type '{}'", index, entity.vendor_type);
            inventory.excluded.insert(index);
            continue;
        }

        if entity.class.is_none() {
            if entity.vendor_type.trim().is_empty() {
                continue;
            }
            entity.class = EntityClass::infer_from_vendor_type(&entity.vendor_type);
        }

        let class = entity.class();
        if !class.is_structural() {
            continue;
        }
        match class {
            EntityClass::Chassis => inventory.chassis.push(index),
            EntityClass::PowerSupply => inventory.power_supplies.push(index),
            _ => {}
        }
        inventory.entities.insert(index, entity);
    }

    for (key, row) in interface_table.iter() {
        let Some(index) = key.as_index() else {
            continue;
        };
        let port = InterfaceRow::from_row(index, row);
        if !port_exclude.is_match(&port.descr) && !port_exclude.is_match(&port.if_type) {
            inventory.ports.push(port);
        }
    }

    let orphans = inventory.exclude_orphans();
    info!(
        "Inventory filtered: {} retained, {} excluded ({} orphaned), {} chassis, {} ports of interest",
        inventory.entities.len(),
        inventory.excluded.len(),
        orphans,
        inventory.chassis().len(),
        inventory.ports.len()
    );

    inventory
}
