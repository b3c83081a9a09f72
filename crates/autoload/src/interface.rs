//! Per-interface lookups into the optional tables.

use sonic_autoload_types::{AutoNegotiation, Duplex};
use tracing::warn;

use crate::snapshot::DeviceSnapshot;
use crate::table::{FieldValuesExt, RowKey, Table};
use crate::tables::fields;

/// Optional properties of one interface. Every field has a usable default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceDetails {
    pub alias: String,
    pub duplex: Duplex,
    pub auto_negotiation: AutoNegotiation,
    pub ipv4_address: String,
    pub ipv6_address: String,
}

impl InterfaceDetails {
    pub fn lookup(snapshot: &DeviceSnapshot, index: u32) -> Self {
        Self {
            alias: alias(snapshot, index),
            duplex: duplex(&snapshot.duplex, index),
            auto_negotiation: auto_negotiation(&snapshot.auto_negotiation, index)
                .unwrap_or_else(|| {
                    warn!("Failed to load auto negotiation property for interface {}", index);
                    AutoNegotiation::default()
                }),
            ipv4_address: ip_address(&snapshot.ipv4_addresses, fields::IPV4_IF_INDEX, index),
            ipv6_address: ip_address(&snapshot.ipv6_addresses, fields::IPV6_IF_INDEX, index),
        }
    }
}

/// `ifAlias` of the interface, or an empty string.
pub fn alias(snapshot: &DeviceSnapshot, index: u32) -> String {
    snapshot
        .if_aliases
        .field(index, fields::IF_ALIAS)
        .unwrap_or_default()
        .to_string()
}

fn index_matches(value: Option<&str>, index: u32) -> bool {
    value.and_then(|v| v.trim().parse::<u32>().ok()) == Some(index)
}

/// Address of the first row bound to `index`.
///
/// Rows are bound through the interface-index column. Tables keyed
/// `<ifIndex>.<address>` without that column are matched on the leading
/// key component instead, and the address is the rest of the key.
pub fn ip_address(table: &Table, index_field: &str, index: u32) -> String {
    for (key, row) in table.iter() {
        if row.has_field(index_field) {
            if index_matches(row.get_field(index_field), index) {
                return key.to_string();
            }
        } else if key.leading_index() == Some(index) {
            return key
                .as_str()
                .split_once('.')
                .map(|(_, address)| address.to_string())
                .unwrap_or_default();
        }
    }
    String::new()
}

/// Duplex of the interface; full unless the duplex table says otherwise.
pub fn duplex(table: &Table, index: u32) -> Duplex {
    table
        .iter()
        .find(|(key, row)| match row.get_field(fields::DUPLEX_INDEX) {
            Some(value) => index_matches(Some(value), index),
            None => key.as_index() == Some(index),
        })
        .and_then(|(_, row)| row.get_field(fields::DUPLEX_STATUS))
        .map(Duplex::from_status)
        .unwrap_or_default()
}

/// Auto-negotiation admin status from the first MAU of the interface;
/// `None` when the row is missing.
pub fn auto_negotiation(table: &Table, index: u32) -> Option<AutoNegotiation> {
    table
        .field(RowKey::new(format!("{}.1", index)), fields::MAU_AUTONEG_ADMIN_STATUS)
        .map(AutoNegotiation::from_admin_status)
}
