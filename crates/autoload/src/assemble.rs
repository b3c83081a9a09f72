//! Resource assembly: chassis, modules, power ports and ports.
//!
//! Each builder reads the resolved addresses from the run's
//! [`DiscoveryContext`] and pulls descriptive attributes from the snapshot.
//! A node whose address cannot be resolved is logged and skipped; it never
//! affects any other node.

use std::collections::HashSet;

use sonic_autoload_types::{EntityClass, MacAddress};
use tracing::{info, instrument, warn};

use crate::adjacency;
use crate::address::{resource_id, NodeRef};
use crate::discovery::DiscoveryContext;
use crate::entity::InterfaceRow;
use crate::interface::InterfaceDetails;
use crate::port_channel::is_port_channel;
use crate::resource::{attributes, models, ResourceKind, ResourceNode};
use crate::snapshot::DeviceSnapshot;
use crate::tables::fields;

fn entity_field(snapshot: &DeviceSnapshot, index: u32, field: &str) -> String {
    snapshot
        .entities
        .field(index, field)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// One resource per active chassis, named after its address.
pub fn chassis(ctx: &mut DiscoveryContext, snapshot: &DeviceSnapshot) -> Vec<ResourceNode> {
    info!("Start loading Chassis");
    let mut nodes = Vec::new();

    for index in ctx.inventory.chassis() {
        let address = match ctx.addresses.resolve(&ctx.inventory, NodeRef::Entity(index)) {
            Ok(address) => address,
            Err(e) => {
                warn!("Skipping chassis: {}", e);
                continue;
            }
        };

        let mut model = entity_field(snapshot, index, fields::ENT_MODEL_NAME);
        if model.is_empty() {
            model = entity_field(snapshot, index, fields::ENT_DESCR);
        }

        let node = ResourceNode::new(
            ResourceKind::Chassis,
            format!("Chassis {}", address),
            models::CHASSIS,
            address,
        )
        .with(attributes::MODEL, model)
        .with(
            attributes::SERIAL_NUMBER,
            entity_field(snapshot, index, fields::ENT_SERIAL_NUM),
        );

        info!("Added {} Chassis", node.name);
        nodes.push(node);
    }

    info!("Finished Loading Chassis");
    nodes
}

/// One resource per module. Slots are numbered from 1 on the device and
/// from 0 in the model.
pub fn modules(ctx: &mut DiscoveryContext, snapshot: &DeviceSnapshot) -> Vec<ResourceNode> {
    info!("Start loading Modules");
    let mut nodes = Vec::new();

    for index in ctx.inventory.modules().to_vec() {
        let address = match ctx.addresses.resolve(&ctx.inventory, NodeRef::Entity(index)) {
            Ok(address) => address,
            Err(e) => {
                warn!("Skipping module: {}", e);
                continue;
            }
        };

        let slot = resource_id(&ctx.inventory, index)
            .ok()
            .and_then(|id| id.trim().parse::<i64>().ok())
            .filter(|id| *id >= 1);
        let Some(slot) = slot else {
            warn!("Skipping module {} at {}: no valid slot number", index, address);
            continue;
        };
        let number = slot - 1;

        let (name, model) = if address.split('/').count() == 2 {
            (format!("Module {}", number), models::MODULE)
        } else {
            (format!("Sub Module {}", number), models::SUB_MODULE)
        };

        let node = ResourceNode::new(ResourceKind::Module, name, model, address)
            .with(attributes::MODEL, entity_field(snapshot, index, fields::ENT_DESCR))
            .with(
                attributes::VERSION,
                entity_field(snapshot, index, fields::ENT_SOFTWARE_REV),
            )
            .with(
                attributes::SERIAL_NUMBER,
                entity_field(snapshot, index, fields::ENT_SERIAL_NUM),
            );

        info!("Added {} Module", node.name);
        nodes.push(node);
    }

    info!("Finished Loading Modules");
    nodes
}

/// Address of the nearest chassis above `index`.
fn chassis_address(ctx: &mut DiscoveryContext, index: u32) -> Option<String> {
    let mut seen = HashSet::new();
    let mut current = ctx.inventory.entity(index)?.contained_in?;
    while seen.insert(current) {
        let row = ctx.inventory.entity(current)?;
        if row.class() == EntityClass::Chassis {
            return ctx
                .addresses
                .resolve(&ctx.inventory, NodeRef::Entity(current))
                .ok();
        }
        current = row.contained_in?;
    }
    None
}

/// One power port per power supply:
/// `<chassis>/PP<parent ordinal>-<own ordinal>`.
pub fn power_ports(ctx: &mut DiscoveryContext, snapshot: &DeviceSnapshot) -> Vec<ResourceNode> {
    info!("Start loading Power Ports");
    let mut nodes = Vec::new();

    for (position, index) in ctx.inventory.power_supplies().into_iter().enumerate() {
        let Some(row) = ctx.inventory.entity(index) else {
            continue;
        };
        let own_ordinal = row.ordinal();
        let parent = row.contained_in;
        let parent_ordinal = parent
            .and_then(|p| ctx.inventory.entity(p))
            .map(|p| p.ordinal())
            .unwrap_or_default();

        let chassis = chassis_address(ctx, index).or_else(|| {
            parent.and_then(|p| ctx.addresses.resolve(&ctx.inventory, NodeRef::Entity(p)).ok())
        });
        let Some(chassis) = chassis else {
            warn!("Skipping power supply {}: no chassis above it", index);
            continue;
        };

        let node = ResourceNode::new(
            ResourceKind::PowerPort,
            format!("PP{}", position),
            models::POWER_PORT,
            format!("{}/PP{}-{}", chassis, parent_ordinal, own_ordinal),
        )
        .with(
            attributes::MODEL,
            entity_field(snapshot, index, fields::ENT_MODEL_NAME),
        )
        .with(
            attributes::PORT_DESCRIPTION,
            entity_field(snapshot, index, fields::ENT_DESCR),
        )
        .with(
            attributes::VERSION,
            entity_field(snapshot, index, fields::ENT_HARDWARE_REV),
        )
        .with(
            attributes::SERIAL_NUMBER,
            entity_field(snapshot, index, fields::ENT_SERIAL_NUM),
        );

        info!(
            "Added {} Power Port",
            entity_field(snapshot, index, fields::ENT_NAME)
        );
        nodes.push(node);
    }

    info!("Finished Loading Power Ports");
    nodes
}

/// `"<type> <chassis>/<slot>/<port>"` with `/` rendered as `-`.
///
/// The chassis component is the entity index of the chassis sitting at the
/// position named by the address's leading ordinal.
pub fn port_name(ctx: &DiscoveryContext, descr: &str, address: &str) -> String {
    let leading = address.split('/').next().unwrap_or_default();
    let chassis_id = leading
        .parse::<usize>()
        .ok()
        .and_then(|position| ctx.inventory.chassis_at(position))
        .map(|index| index.to_string())
        .unwrap_or_else(|| leading.to_string());

    let name = match descr.split_once(' ') {
        Some((kind, rest)) => format!("{} {}/{}", kind, chassis_id, rest.trim()),
        None => format!("{}/{}", chassis_id, descr),
    };
    name.replace('/', "-")
}

fn mac_address(raw: &str) -> String {
    raw.parse::<MacAddress>()
        .map(|mac| mac.to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}

#[instrument(skip_all, fields(port = %port.descr))]
fn port_resource(
    ctx: &mut DiscoveryContext,
    snapshot: &DeviceSnapshot,
    port: &InterfaceRow,
) -> Option<ResourceNode> {
    let address = match ctx.addresses.resolve(&ctx.inventory, NodeRef::Interface(port.index)) {
        Ok(address) => address,
        Err(e) => {
            warn!("Skipping port: {}", e);
            return None;
        }
    };

    let details = InterfaceDetails::lookup(snapshot, port.index);
    let node = ResourceNode::new(
        ResourceKind::Port,
        port_name(ctx, &port.descr, &address),
        models::PORT,
        address,
    )
    .with(attributes::L2_PROTOCOL_TYPE, port.l2_protocol_type())
    .with(attributes::MAC_ADDRESS, mac_address(&port.phys_address))
    .with(attributes::MTU, port.mtu.as_str())
    .with(attributes::BANDWIDTH, port.speed.as_str())
    .with(attributes::PORT_DESCRIPTION, details.alias)
    .with(attributes::DUPLEX, details.duplex.to_string())
    .with(attributes::AUTO_NEGOTIATION, details.auto_negotiation.to_string())
    .with(attributes::IPV4_ADDRESS, details.ipv4_address)
    .with(attributes::IPV6_ADDRESS, details.ipv6_address)
    .with(
        attributes::ADJACENT,
        adjacency::adjacent(snapshot, port.index, &port.descr),
    );

    info!("Added {} Port", node.name);
    Some(node)
}

/// One resource per port of interest. Port-channel interfaces are left to
/// the port-channel matcher.
pub fn ports(ctx: &mut DiscoveryContext, snapshot: &DeviceSnapshot) -> Vec<ResourceNode> {
    info!("Start loading Ports");
    let candidates: Vec<InterfaceRow> = ctx
        .inventory
        .ports()
        .iter()
        .filter(|p| !is_port_channel(&p.descr))
        .cloned()
        .collect();

    let nodes = candidates
        .iter()
        .filter_map(|p| port_resource(ctx, snapshot, p))
        .collect();

    info!("Finished Loading Ports");
    nodes
}
