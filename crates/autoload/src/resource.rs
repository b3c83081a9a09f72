//! Discovered resources and the flat output sequences.
//!
//! Every resource is emitted twice: once as an [`AutoloadResource`]
//! descriptor and once per attribute as an [`AutoloadAttribute`] tuple
//! keyed by the resource's relative address.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Host-inventory attribute names.
pub mod attributes {
    pub const SYSTEM_NAME: &str = "System Name";
    pub const VENDOR: &str = "Vendor";
    pub const LOCATION: &str = "Location";
    pub const CONTACT_NAME: &str = "Contact Name";
    pub const OS_VERSION: &str = "OS Version";

    pub const MODEL: &str = "Model";
    pub const SERIAL_NUMBER: &str = "Serial Number";
    pub const VERSION: &str = "Version";
    pub const PORT_DESCRIPTION: &str = "Port Description";

    pub const L2_PROTOCOL_TYPE: &str = "L2 Protocol Type";
    pub const MAC_ADDRESS: &str = "MAC Address";
    pub const MTU: &str = "MTU";
    pub const BANDWIDTH: &str = "Bandwidth";
    pub const DUPLEX: &str = "Duplex";
    pub const AUTO_NEGOTIATION: &str = "Auto Negotiation";
    pub const IPV4_ADDRESS: &str = "IPv4 Address";
    pub const IPV6_ADDRESS: &str = "IPv6 Address";
    pub const ADJACENT: &str = "Adjacent";

    pub const ASSOCIATED_PORTS: &str = "Associated Ports";
}

/// Generic resource models.
pub mod models {
    pub const CHASSIS: &str = "Generic Chassis";
    pub const MODULE: &str = "Generic Module";
    pub const SUB_MODULE: &str = "Generic Sub Module";
    pub const PORT: &str = "Generic Port";
    pub const POWER_PORT: &str = "Generic Power Port";
    pub const PORT_CHANNEL: &str = "Generic Port Channel";
}

/// Kind of a discovered resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Chassis,
    Module,
    PowerPort,
    PortChannel,
    Port,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Chassis,
        ResourceKind::Module,
        ResourceKind::PowerPort,
        ResourceKind::PortChannel,
        ResourceKind::Port,
    ];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Chassis => "Chassis",
            ResourceKind::Module => "Module",
            ResourceKind::PowerPort => "Power Port",
            ResourceKind::PortChannel => "Port Channel",
            ResourceKind::Port => "Port",
        };
        write!(f, "{}", s)
    }
}

/// One assembled resource with its attribute bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub kind: ResourceKind,
    pub name: String,
    pub model: &'static str,
    pub relative_address: String,
    pub attributes: Vec<(&'static str, String)>,
}

impl ResourceNode {
    pub fn new(
        kind: ResourceKind,
        name: impl Into<String>,
        model: &'static str,
        relative_address: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            model,
            relative_address: relative_address.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Resource descriptor handed to the host inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoloadResource {
    pub kind: ResourceKind,
    pub model: String,
    pub name: String,
    pub relative_address: String,
    pub unique_identifier: String,
}

/// One attribute value owned by the resource at `relative_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoloadAttribute {
    pub relative_address: String,
    pub attribute_name: String,
    pub attribute_value: String,
}

/// Result of one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutoloadDetails {
    pub resources: Vec<AutoloadResource>,
    pub attributes: Vec<AutoloadAttribute>,
}

/// Deterministic identifier for a resource on a named device.
pub fn unique_identifier(system_name: &str, relative_address: &str, name: &str) -> String {
    let key = format!("{}/{}/{}", system_name, relative_address, name);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

impl AutoloadDetails {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.attributes.is_empty()
    }

    /// Appends a device-level attribute (empty relative address).
    pub fn add_root_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push(AutoloadAttribute {
            relative_address: String::new(),
            attribute_name: name.to_string(),
            attribute_value: value.into(),
        });
    }

    /// Appends a resource descriptor and its attributes.
    pub fn add(&mut self, node: ResourceNode, system_name: &str) {
        let unique_identifier =
            unique_identifier(system_name, &node.relative_address, &node.name);

        self.attributes
            .extend(node.attributes.into_iter().map(|(name, value)| AutoloadAttribute {
                relative_address: node.relative_address.clone(),
                attribute_name: name.to_string(),
                attribute_value: value,
            }));
        self.resources.push(AutoloadResource {
            kind: node.kind,
            model: node.model.to_string(),
            name: node.name,
            relative_address: node.relative_address,
            unique_identifier,
        });
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    pub fn resource(&self, relative_address: &str) -> Option<&AutoloadResource> {
        self.resources
            .iter()
            .find(|r| r.relative_address == relative_address)
    }

    /// Value of one attribute of the resource at `relative_address`.
    pub fn attribute(&self, relative_address: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.relative_address == relative_address && a.attribute_name == name)
            .map(|a| a.attribute_value.as_str())
    }
}
