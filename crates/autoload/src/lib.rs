//! SNMP topology autoload
//!
//! Rebuilds the physical topology of a switch (chassis, modules, power
//! ports, ports and port-channels) from flat, index-keyed management
//! tables. Rows are consumed pre-decoded through a [`TableSource`]; the
//! result is a pair of flat sequences, resource descriptors and attribute
//! tuples, keyed by relative address.

pub mod address;
pub mod adjacency;
pub mod assemble;
pub mod bay;
pub mod classify;
pub mod config;
pub mod device;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod interface;
pub mod port_channel;
pub mod resource;
pub mod snapshot;
pub mod source;
pub mod table;
pub mod tables;

pub use address::{AddressTable, NodeRef};
pub use classify::{classify, Inventory};
pub use config::{AutoloadConfig, DiscoveryConfig, DEFAULT_CONFIG_PATH};
pub use discovery::{discover, Discovery, DiscoveryContext};
pub use entity::{EntityRow, InterfaceRow};
pub use error::*;
pub use resource::{
    AutoloadAttribute, AutoloadDetails, AutoloadResource, ResourceKind, ResourceNode,
};
pub use snapshot::{DeviceSnapshot, SystemInfo};
pub use source::{MemorySource, TableSource};
pub use table::{FieldValue, FieldValues, FieldValuesExt, RowKey, Table};

pub use sonic_autoload_types::{AutoNegotiation, Duplex, EntityClass, MacAddress};
