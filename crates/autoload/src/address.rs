//! Relative address resolution.
//!
//! A relative address is a slash-delimited ordinal path (`"0/2/1"`) naming a
//! resource's position in the physical hierarchy. Addresses are computed by
//! walking parent chains, memoized per node, and guarded against cyclic
//! chains with a visiting set.
//!
//! Rules for an entity node `n`:
//!
//! - a chassis (or a root stack) is addressed by its own resource id, with the
//!   unresolved sentinel `-1` normalized to `0`;
//! - a container or backplane is transparent and shares its parent's address;
//! - anything else is `resolve(parent)/resource_id(n)`.
//!
//! An interface node is addressed under the `MODULE <slot>` entity decoded
//! from its description: `resolve(module)/<port>`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::classify::Inventory;
use crate::error::AddressError;

/// A node in one of the two index spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    /// Physical inventory row.
    Entity(u32),
    /// Interface table row.
    Interface(u32),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Entity(index) => write!(f, "entity {}", index),
            NodeRef::Interface(index) => write!(f, "interface {}", index),
        }
    }
}

/// Normalizes a chassis ordinal: unresolved (`-1` or blank) becomes `0`.
pub fn chassis_ordinal(resource_id: &str) -> String {
    match resource_id.trim() {
        "" | "-1" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Resource id of an entity.
///
/// The ordinal of the immediate container/backplane parent if there is one;
/// if the parent was excluded, the parent's resource id; otherwise the
/// entity's own sibling ordinal.
pub fn resource_id(inventory: &Inventory, index: u32) -> Result<String, AddressError> {
    let mut seen = HashSet::new();
    let mut current = index;
    loop {
        if !seen.insert(current) {
            return Err(AddressError::Cycle(NodeRef::Entity(index)));
        }
        let row = inventory
            .entity(current)
            .ok_or(AddressError::UnknownNode(NodeRef::Entity(current)))?;

        let parent = row
            .contained_in
            .filter(|p| *p > 0 && *p != current)
            .and_then(|p| inventory.entity(p));

        match parent {
            Some(parent) if parent.class().is_transparent() => return Ok(parent.ordinal()),
            Some(parent) if inventory.is_excluded(parent.index) => current = parent.index,
            _ => return Ok(row.ordinal()),
        }
    }
}

/// Memoized address table for one discovery run.
#[derive(Debug, Default)]
pub struct AddressTable {
    cache: HashMap<NodeRef, String>,
    visiting: HashSet<NodeRef>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A previously resolved address.
    pub fn get(&self, node: NodeRef) -> Option<&str> {
        self.cache.get(&node).map(String::as_str)
    }

    /// Assigns every active chassis its address. Runs before any descendant
    /// is resolved.
    pub fn seed_chassis(&mut self, inventory: &Inventory) {
        for chassis in inventory.chassis() {
            match resource_id(inventory, chassis) {
                Ok(id) => {
                    let address = chassis_ordinal(&id);
                    debug!("Chassis {} at address {}", chassis, address);
                    self.cache.insert(NodeRef::Entity(chassis), address);
                }
                Err(e) => debug!("Chassis {} left unseeded: {}", chassis, e),
            }
        }
    }

    /// Resolves (and memoizes) the address of `node`.
    pub fn resolve(&mut self, inventory: &Inventory, node: NodeRef) -> Result<String, AddressError> {
        if let Some(address) = self.cache.get(&node) {
            return Ok(address.clone());
        }
        if !self.visiting.insert(node) {
            return Err(AddressError::Cycle(node));
        }

        let result = self.compute(inventory, node);
        self.visiting.remove(&node);

        if let Ok(address) = &result {
            self.cache.insert(node, address.clone());
        }
        result
    }

    fn compute(&mut self, inventory: &Inventory, node: NodeRef) -> Result<String, AddressError> {
        match node {
            NodeRef::Entity(index) => {
                let row = inventory
                    .entity(index)
                    .ok_or(AddressError::UnknownNode(node))?;

                if row.is_anchor() {
                    return Ok(chassis_ordinal(&resource_id(inventory, index)?));
                }

                let parent = row.contained_in.ok_or(AddressError::UnknownNode(node))?;
                let parent_address = self.resolve(inventory, NodeRef::Entity(parent))?;
                if row.class().is_transparent() {
                    return Ok(parent_address);
                }
                Ok(format!("{}/{}", parent_address, resource_id(inventory, index)?))
            }
            NodeRef::Interface(index) => {
                let port = inventory
                    .port(index)
                    .ok_or(AddressError::UnknownNode(node))?;
                let (slot, port_id) =
                    port.slot_and_port()
                        .ok_or_else(|| AddressError::UndecodablePort {
                            index,
                            descr: port.descr.clone(),
                        })?;
                let module = inventory
                    .module_named(&format!("MODULE {}", slot))
                    .ok_or(AddressError::MissingModule { index, slot })?;

                let module_address = self.resolve(inventory, NodeRef::Entity(module))?;
                Ok(format!("{}/{}", module_address, port_id))
            }
        }
    }
}
