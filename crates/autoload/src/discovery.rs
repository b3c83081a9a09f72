//! The discovery run.
//!
//! [`Discovery`] is created fresh for every device. It owns one
//! [`DiscoveryContext`] (filtered inventory plus memoized addresses) for
//! the duration of [`Discovery::run`]; nothing is shared between runs.

use regex::Regex;
use tracing::{error, info, instrument};

use crate::address::AddressTable;
use crate::assemble;
use crate::bay;
use crate::classify::{classify, Inventory};
use crate::config::AutoloadConfig;
use crate::device;
use crate::error::AutoloadResult;
use crate::port_channel;
use crate::resource::{AutoloadDetails, ResourceKind, ResourceNode};
use crate::snapshot::DeviceSnapshot;
use crate::source::TableSource;

/// Per-run resolution state.
#[derive(Debug, Default)]
pub struct DiscoveryContext {
    pub inventory: Inventory,
    pub addresses: AddressTable,
}

impl DiscoveryContext {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            addresses: AddressTable::new(),
        }
    }
}

/// One discovery over one device snapshot.
pub struct Discovery<'a> {
    snapshot: &'a DeviceSnapshot,
    config: &'a AutoloadConfig,
    port_exclude: Regex,
}

impl<'a> Discovery<'a> {
    pub fn new(snapshot: &'a DeviceSnapshot, config: &'a AutoloadConfig) -> AutoloadResult<Self> {
        Ok(Self {
            snapshot,
            config,
            port_exclude: config.port_exclude_regex()?,
        })
    }

    /// Classifies, repairs and resolves the inventory, then assembles every
    /// resource.
    ///
    /// A snapshot with no chassis left after filtering yields an empty
    /// result, not an error.
    #[instrument(skip(self), fields(system = %self.snapshot.system.name))]
    pub fn run(&self) -> AutoloadResult<AutoloadDetails> {
        info!("Start SNMP discovery process");

        let inventory = classify(
            &self.snapshot.entities,
            &self.snapshot.interfaces,
            &self.config.discovery.entity_blacklist,
            &self.port_exclude,
        );
        if inventory.chassis().is_empty() {
            error!("Entity table error, no chassis found");
            return Ok(AutoloadDetails::default());
        }

        let mut ctx = DiscoveryContext::new(inventory);
        bay::merge_split_bays(&mut ctx.inventory);
        ctx.inventory.collect_modules();
        ctx.addresses.seed_chassis(&ctx.inventory);

        let mut details = AutoloadDetails::default();
        device::add_root_attributes(
            &mut details,
            &self.snapshot.system,
            &self.config.discovery,
            &self.config.models,
        );

        let nodes: Vec<ResourceNode> = assemble::chassis(&mut ctx, self.snapshot)
            .into_iter()
            .chain(assemble::modules(&mut ctx, self.snapshot))
            .chain(assemble::power_ports(&mut ctx, self.snapshot))
            .chain(port_channel::port_channels(self.snapshot))
            .chain(assemble::ports(&mut ctx, self.snapshot))
            .collect();

        let system_name = self.snapshot.system.name.trim();
        for node in nodes {
            details.add(node, system_name);
        }

        log_summary(&details);
        Ok(details)
    }
}

fn log_summary(details: &AutoloadDetails) {
    info!("Discover completed. The following structure has been loaded:");
    for resource in &details.resources {
        info!(
            model = %resource.model,
            name = %resource.name,
            relative_address = %resource.relative_address,
            unique_id = %resource.unique_identifier,
            "Resource"
        );
    }
    for kind in ResourceKind::ALL {
        info!("{}: {}", kind, details.count(kind));
    }
    info!("{} attributes", details.attributes.len());
}

/// Collects a snapshot from `source` and runs discovery over it.
pub async fn discover(
    source: &dyn TableSource,
    config: &AutoloadConfig,
) -> AutoloadResult<AutoloadDetails> {
    let snapshot = DeviceSnapshot::collect(source).await?;
    if config.discovery.validate_os {
        device::validate_os(&snapshot.system, &config.discovery.supported_os)?;
    }
    Discovery::new(&snapshot, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_chassis_is_empty_result() {
        let mut snapshot = DeviceSnapshot::default();
        snapshot.entities.insert(
            10u32,
            field_values! {
                "entPhysicalContainedIn" => "1",
                "entPhysicalParentRelPos" => "1",
                "entPhysicalClass" => "module",
            },
        );
        let config = AutoloadConfig::default();
        let details = Discovery::new(&snapshot, &config).unwrap().run().unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn test_bad_exclude_pattern_is_config_error() {
        let snapshot = DeviceSnapshot::default();
        let mut config = AutoloadConfig::default();
        config.discovery.port_exclude_pattern = "(".to_string();
        assert!(matches!(
            Discovery::new(&snapshot, &config),
            Err(crate::error::AutoloadError::Config(_))
        ));
    }

    #[test]
    fn test_minimal_run() {
        let mut snapshot = DeviceSnapshot::default();
        snapshot.system.name = "vdx-1".to_string();
        snapshot.entities.insert(
            1u32,
            field_values! {
                "entPhysicalContainedIn" => "0",
                "entPhysicalParentRelPos" => "-1",
                "entPhysicalClass" => "chassis",
            },
        );
        let config = AutoloadConfig::default();
        let details = Discovery::new(&snapshot, &config).unwrap().run().unwrap();

        assert_eq!(details.count(ResourceKind::Chassis), 1);
        assert_eq!(details.resources[0].relative_address, "0");
        assert_eq!(details.attribute("", "System Name"), Some("vdx-1"));
    }
}
