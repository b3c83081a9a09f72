//! Port-channel (LAG) discovery.

use std::collections::BTreeSet;

use tracing::{error, info};

use crate::entity::InterfaceRow;
use crate::interface;
use crate::resource::{attributes, models, ResourceKind, ResourceNode};
use crate::snapshot::DeviceSnapshot;
use crate::table::FieldValuesExt;
use crate::tables::fields;

/// A port-channel interface: description contains "channel" and it is not
/// a sub-interface.
pub fn is_port_channel(descr: &str) -> bool {
    descr.to_lowercase().contains("channel") && !descr.contains('.')
}

/// Trailing numeric id of a port-channel description.
pub fn channel_id(descr: &str) -> Option<&str> {
    let trimmed = descr.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    trimmed.get(start..)
}

/// Member ports of channel `id`, rendered `"Te1-0-1; Te1-0-2"`.
///
/// LAG rows are matched when their attached aggregation id contains `id`;
/// members missing from the interface table are ignored.
pub fn associated_ports(snapshot: &DeviceSnapshot, id: &str) -> String {
    let mut members = BTreeSet::new();
    for (key, row) in snapshot.lag_ports.iter() {
        let attached = row.get_field_or(fields::LAG_ATTACHED_AGG_ID, "");
        if !attached.contains(id) {
            continue;
        }
        let Some(member) = key.as_index() else {
            continue;
        };
        if let Some(descr) = snapshot.interfaces.field(member, fields::IF_DESCR) {
            members.insert((member, descr.replace('/', "-").replace(' ', "")));
        }
    }
    members
        .into_iter()
        .map(|(_, name)| name)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds one resource per port-channel interface. Channels without a
/// numeric id are logged and skipped.
pub fn port_channels(snapshot: &DeviceSnapshot) -> Vec<ResourceNode> {
    info!("Start loading Port Channels");
    let mut channels = Vec::new();

    for (key, row) in snapshot.interfaces.iter() {
        let Some(index) = key.as_index() else {
            continue;
        };
        let channel = InterfaceRow::from_row(index, row);
        if !is_port_channel(&channel.descr) {
            continue;
        }
        let Some(id) = channel_id(&channel.descr) else {
            error!("Failed to load port channel '{}': no numeric id", channel.descr);
            continue;
        };

        let node = ResourceNode::new(
            ResourceKind::PortChannel,
            channel.descr.clone(),
            models::PORT_CHANNEL,
            format!("PC{}", id),
        )
        .with(attributes::PORT_DESCRIPTION, interface::alias(snapshot, index))
        .with(attributes::ASSOCIATED_PORTS, associated_ports(snapshot, id))
        .with(
            attributes::IPV4_ADDRESS,
            interface::ip_address(&snapshot.ipv4_addresses, fields::IPV4_IF_INDEX, index),
        )
        .with(
            attributes::IPV6_ADDRESS,
            interface::ip_address(&snapshot.ipv6_addresses, fields::IPV6_IF_INDEX, index),
        );

        info!("Added {} Port Channel", channel.descr);
        channels.push(node);
    }

    info!("Finished Loading Port Channels");
    channels
}
