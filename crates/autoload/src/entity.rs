//! Typed views over raw inventory and interface rows.

use sonic_autoload_types::EntityClass;

use crate::table::{FieldValues, FieldValuesExt};
use crate::tables::fields;

/// One row of the physical inventory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub index: u32,
    /// Parent index; `None` when the column is blank.
    pub contained_in: Option<u32>,
    /// Ordinal among siblings; `None` when the column is blank.
    pub parent_rel_pos: Option<i32>,
    /// Declared class; `None` when the column is blank or undecodable.
    pub class: Option<EntityClass>,
    pub vendor_type: String,
    pub description: String,
    pub name: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl EntityRow {
    pub fn from_row(index: u32, row: &FieldValues) -> Self {
        Self {
            index,
            contained_in: non_blank(row.get_field(fields::ENT_CONTAINED_IN))
                .and_then(|v| v.parse().ok()),
            parent_rel_pos: non_blank(row.get_field(fields::ENT_PARENT_REL_POS))
                .and_then(|v| v.parse().ok()),
            class: non_blank(row.get_field(fields::ENT_CLASS)).and_then(|v| v.parse().ok()),
            vendor_type: row.get_field_or(fields::ENT_VENDOR_TYPE, "").to_string(),
            description: row.get_field_or(fields::ENT_DESCR, "").to_string(),
            name: row.get_field_or(fields::ENT_NAME, "").trim().to_string(),
        }
    }

    /// Class used by the engine. Rows that were never classified count as
    /// `Unknown`.
    pub fn class(&self) -> EntityClass {
        self.class.unwrap_or(EntityClass::Unknown)
    }

    /// A root has no parent in the table: `containedIn` is 0 or itself.
    pub fn is_root(&self) -> bool {
        matches!(self.contained_in, Some(0)) || self.contained_in == Some(self.index)
    }

    /// Rows that head the tree and are never orphaned: any chassis, and a
    /// stack at the root. Other roots are strays.
    pub fn is_anchor(&self) -> bool {
        match self.class() {
            EntityClass::Chassis => true,
            EntityClass::Stack => self.is_root(),
            _ => false,
        }
    }

    /// Sibling ordinal rendered for addresses; blank positions never reach
    /// the working table.
    pub fn ordinal(&self) -> String {
        self.parent_rel_pos
            .map(|p| p.to_string())
            .unwrap_or_default()
    }
}

/// One row of the interface table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRow {
    pub index: u32,
    pub descr: String,
    pub if_type: String,
    pub phys_address: String,
    pub mtu: String,
    pub speed: String,
}

impl InterfaceRow {
    pub fn from_row(index: u32, row: &FieldValues) -> Self {
        Self {
            index,
            descr: row.get_field_or(fields::IF_DESCR, "").trim().to_string(),
            if_type: row.get_field_or(fields::IF_TYPE, "").to_string(),
            phys_address: row.get_field_or(fields::IF_PHYS_ADDRESS, "").to_string(),
            mtu: row.get_field_or(fields::IF_MTU, "").to_string(),
            speed: row.get_field_or(fields::IF_SPEED, "").to_string(),
        }
    }

    /// Decodes `"<name> <slot>/<port>"` into the slot number and the port
    /// token.
    ///
    /// The token is every component after the slot, joined with `-`, so
    /// `1/0/7` and `1/1/7` stay distinct under `MODULE 1` (`0-7`, `1-7`).
    pub fn slot_and_port(&self) -> Option<(u32, String)> {
        let mut parts = self.descr.split('/');
        let head = parts.next()?;
        let rest: Vec<&str> = parts.map(str::trim).collect();
        if rest.is_empty() || rest.iter().any(|p| p.is_empty()) {
            return None;
        }

        let digits_from = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        let slot = head.get(digits_from..)?.parse().ok()?;
        Some((slot, rest.join("-")))
    }

    /// `ifType` with quoting and path separators stripped.
    pub fn l2_protocol_type(&self) -> String {
        self.if_type
            .chars()
            .filter(|c| !matches!(c, '/' | '\'' | '\\'))
            .collect()
    }
}
