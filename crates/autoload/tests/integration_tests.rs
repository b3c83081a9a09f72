//! Integration tests for autoload discovery
//!
//! Drives full discovery runs over in-memory snapshots:
//! - Chassis, module, power port, port and port-channel assembly
//! - Split module-bay repair
//! - Defaults for optional per-port properties
//! - Data-quality aborts and JSON snapshot files

use pretty_assertions::assert_eq;
use regex::Regex;
use sonic_autoload::bay::merge_split_bays;
use sonic_autoload::tables::{self, scalars};
use sonic_autoload::{
    classify, discover, field_values, AddressTable, AutoloadConfig, AutoloadError,
    DeviceSnapshot, Discovery, MemorySource, NodeRef, ResourceKind,
};

/// Test fixture: a small VDX-like device
struct TestDevice {
    source: MemorySource,
}

impl TestDevice {
    fn new() -> Self {
        let source = MemorySource::new("vdx-test")
            .with_scalar(scalars::SYS_NAME, "vdx-1")
            .with_scalar(
                scalars::SYS_DESCR,
                "Brocade VDX Switch, BR-VDX6740, Network Operating System Software Version 7.0.1a, x",
            )
            .with_scalar(scalars::SYS_OBJECT_ID, "SNMPv2-SMI::enterprises.1588.3.3.1.131");
        Self { source }.with_entity(1, 0, -1, "chassis", "Chassis")
    }

    fn with_entity(mut self, index: u32, parent: u32, rel_pos: i32, class: &str, name: &str) -> Self {
        self.source = self.source.with_row(
            tables::ENT_PHYSICAL_TABLE,
            index,
            field_values! {
                "entPhysicalContainedIn" => parent,
                "entPhysicalParentRelPos" => rel_pos,
                "entPhysicalClass" => class,
                "entPhysicalName" => name,
                "entPhysicalSerialNum" => format!("SN{}", index),
            },
        );
        self
    }

    fn with_interface(mut self, index: u32, descr: &str, if_type: &str) -> Self {
        self.source = self.source.with_row(
            tables::IF_TABLE,
            index,
            field_values! {
                "ifDescr" => descr,
                "ifType" => if_type,
                "ifPhysAddress" => "0x0027f8a1b2c3",
                "ifMtu" => "9216",
                "ifSpeed" => "10000000000",
            },
        );
        self
    }

    fn with_lag_member(mut self, member: u32, channel: &str) -> Self {
        self.source = self.source.with_row(
            tables::LAG_PORT_TABLE,
            member,
            field_values! { "dot3adAggPortAttachedAggID" => channel },
        );
        self
    }
}

fn port_exclude() -> Regex {
    AutoloadConfig::default().port_exclude_regex().unwrap()
}

#[tokio::test]
async fn test_module_numbering_starts_at_zero() {
    let device = TestDevice::new().with_entity(10, 1, 1, "module", "MODULE 1");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .expect("discovery failed");

    let module = details.resource("0/1").expect("module not discovered");
    assert_eq!(module.kind, ResourceKind::Module);
    assert_eq!(module.name, "Module 0");
    assert_eq!(module.model, "Generic Module");
    assert_eq!(details.resource("0").map(|c| c.name.as_str()), Some("Chassis 0"));
}

#[tokio::test]
async fn test_split_bays_are_merged() {
    let device = TestDevice::new()
        .with_entity(5, 1, 1, "container", "Upper Module Bay")
        .with_entity(6, 1, 2, "container", "Lower Module Bay")
        .with_entity(51, 5, 1, "module", "")
        .with_entity(52, 5, 2, "module", "")
        .with_entity(61, 6, 1, "module", "");
    let snapshot = DeviceSnapshot::collect(&device.source).await.unwrap();

    let mut inventory = classify(&snapshot.entities, &snapshot.interfaces, &[], &port_exclude());
    assert_eq!(merge_split_bays(&mut inventory), 1);

    let moved = inventory.entity(61).unwrap();
    assert_eq!(moved.contained_in, Some(5));
    assert_eq!(moved.parent_rel_pos, Some(3));

    // Idempotent
    assert_eq!(merge_split_bays(&mut inventory), 0);
    assert_eq!(inventory.entity(61).unwrap().parent_rel_pos, Some(3));
}

#[tokio::test]
async fn test_port_defaults_without_optional_rows() {
    let device = TestDevice::new()
        .with_entity(10, 1, 2, "module", "MODULE 2")
        .with_interface(1205, "port 2/5", "ethernetCsmacd");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .expect("discovery failed");

    let port = details.resource("0/2/5").expect("port not discovered");
    assert_eq!(port.kind, ResourceKind::Port);
    assert_eq!(port.name, "port 1-2-5");
    assert_eq!(details.attribute("0/2/5", "Duplex"), Some("Full"));
    assert_eq!(details.attribute("0/2/5", "Auto Negotiation"), Some("False"));
    assert_eq!(details.attribute("0/2/5", "Adjacent"), Some(""));
    assert_eq!(details.attribute("0/2/5", "IPv4 Address"), Some(""));
    assert_eq!(
        details.attribute("0/2/5", "MAC Address"),
        Some("00:27:f8:a1:b2:c3")
    );
}

#[tokio::test]
async fn test_port_properties_from_optional_tables() {
    let mut device = TestDevice::new()
        .with_entity(10, 1, 2, "module", "MODULE 2")
        .with_interface(1205, "port 2/5", "ethernetCsmacd");
    device.source = device
        .source
        .with_row(
            tables::DUPLEX_TABLE,
            1205u32,
            field_values! { "dot3StatsIndex" => "1205", "dot3StatsDuplexStatus" => "halfDuplex" },
        )
        .with_row(
            tables::MAU_AUTONEG_TABLE,
            "1205.1",
            field_values! { "ifMauAutoNegAdminStatus" => "enabled" },
        )
        .with_row(
            tables::IPV4_ADDR_TABLE,
            "10.1.1.1",
            field_values! { "ipAdEntIfIndex" => "1205" },
        )
        .with_row(
            tables::IF_ALIAS_TABLE,
            1205u32,
            field_values! { "ifAlias" => "uplink" },
        )
        .with_row(
            tables::CDP_CACHE_TABLE,
            "1205.1",
            field_values! { "cdpCacheDeviceId" => "core-1", "cdpCacheDevicePort" => "Te 0/9" },
        );

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();

    assert_eq!(details.attribute("0/2/5", "Duplex"), Some("Half"));
    assert_eq!(details.attribute("0/2/5", "Auto Negotiation"), Some("True"));
    assert_eq!(details.attribute("0/2/5", "IPv4 Address"), Some("10.1.1.1"));
    assert_eq!(details.attribute("0/2/5", "Port Description"), Some("uplink"));
    assert_eq!(details.attribute("0/2/5", "Adjacent"), Some("core-1 through Te 0/9"));
}

#[tokio::test]
async fn test_zero_chassis_yields_empty_result() {
    let source = MemorySource::new("no-chassis")
        .with_row(
            tables::ENT_PHYSICAL_TABLE,
            10u32,
            field_values! {
                "entPhysicalContainedIn" => "1",
                "entPhysicalParentRelPos" => "1",
                "entPhysicalClass" => "module",
            },
        )
        .with_row(
            tables::ENT_PHYSICAL_TABLE,
            1u32,
            field_values! {
                "entPhysicalContainedIn" => "0",
                "entPhysicalParentRelPos" => "-1",
                "entPhysicalClass" => "chassis",
                "entPhysicalVendorType" => "cevAlarmChassis",
            },
        );

    let details = discover(&source, &AutoloadConfig::default()).await.unwrap();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_empty_inventory_is_fatal() {
    let source = MemorySource::new("empty");
    let err = discover(&source, &AutoloadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AutoloadError::EmptyInventory));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_unresolvable_port_does_not_abort() {
    let device = TestDevice::new()
        .with_entity(10, 1, 1, "module", "MODULE 1")
        .with_interface(1101, "TenGigabitEthernet 1/0/1", "ethernetCsmacd")
        .with_interface(1901, "TenGigabitEthernet 9/0/1", "ethernetCsmacd");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();
    assert_eq!(details.count(ResourceKind::Port), 1);
    assert!(details.resource("0/1/0-1").is_some());
}

#[tokio::test]
async fn test_three_part_ports_have_distinct_addresses() {
    let device = TestDevice::new()
        .with_entity(10, 1, 1, "module", "MODULE 1")
        .with_interface(1101, "TenGigabitEthernet 1/0/1", "ethernetCsmacd")
        .with_interface(1102, "TenGigabitEthernet 1/0/2", "ethernetCsmacd")
        .with_interface(1103, "TenGigabitEthernet 1/0/3", "ethernetCsmacd")
        .with_interface(1111, "TenGigabitEthernet 1/1/1", "ethernetCsmacd");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();

    let addresses: Vec<&str> = details
        .resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Port)
        .map(|r| r.relative_address.as_str())
        .collect();
    assert_eq!(addresses, vec!["0/1/0-1", "0/1/0-2", "0/1/0-3", "0/1/1-1"]);

    let mut mtu_owners: Vec<&str> = details
        .attributes
        .iter()
        .filter(|a| a.attribute_name == "MTU")
        .map(|a| a.relative_address.as_str())
        .collect();
    mtu_owners.dedup();
    assert_eq!(mtu_owners.len(), 4);
}

#[tokio::test]
async fn test_stray_root_module_is_not_emitted() {
    let device = TestDevice::new()
        .with_entity(10, 1, 1, "module", "MODULE 1")
        .with_entity(50, 0, 4, "module", "MODULE 4")
        .with_entity(51, 50, 1, "module", "");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();

    let modules: Vec<(&str, &str)> = details
        .resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Module)
        .map(|r| (r.name.as_str(), r.relative_address.as_str()))
        .collect();
    assert_eq!(modules, vec![("Module 0", "0/1")]);
}

#[tokio::test]
async fn test_port_channel_members() {
    let device = TestDevice::new()
        .with_entity(10, 1, 1, "module", "MODULE 1")
        .with_interface(1101, "TenGigabitEthernet 1/0/1", "ethernetCsmacd")
        .with_interface(1102, "TenGigabitEthernet 1/0/2", "ethernetCsmacd")
        .with_interface(671088641, "Port-channel 3", "ieee8023adLag")
        .with_lag_member(1101, "3")
        .with_lag_member(1102, "3")
        .with_lag_member(4242, "3");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();

    let channel = details.resource("PC3").expect("port channel not discovered");
    assert_eq!(channel.kind, ResourceKind::PortChannel);
    assert_eq!(channel.name, "Port-channel 3");
    assert_eq!(
        details.attribute("PC3", "Associated Ports"),
        Some("TenGigabitEthernet1-0-1; TenGigabitEthernet1-0-2")
    );
    // The channel interface is not also reported as a port
    assert_eq!(details.count(ResourceKind::Port), 2);
    assert!(details.resource("0/1/0-1").is_some());
    assert!(details.resource("0/1/0-2").is_some());
}

#[tokio::test]
async fn test_power_ports() {
    let device = TestDevice::new()
        .with_entity(30, 1, 5, "container", "PSU bay")
        .with_entity(31, 30, 1, "powerSupply", "PSU 1")
        .with_entity(32, 30, 2, "powerSupply", "PSU 2");

    let details = discover(&device.source, &AutoloadConfig::default())
        .await
        .unwrap();

    assert_eq!(details.resource("0/PP5-1").map(|r| r.name.as_str()), Some("PP0"));
    assert_eq!(details.resource("0/PP5-2").map(|r| r.name.as_str()), Some("PP1"));
    assert_eq!(details.attribute("0/PP5-2", "Serial Number"), Some("SN32"));
}

#[tokio::test]
async fn test_root_attributes_and_unique_ids() {
    let device = TestDevice::new()
        .with_entity(10, 1, 1, "module", "MODULE 1")
        .with_entity(11, 1, 2, "module", "MODULE 2");
    let mut config = AutoloadConfig::default();
    config
        .models
        .insert("131".to_string(), "VDX_6740".to_string());

    let details = discover(&device.source, &config).await.unwrap();

    assert_eq!(details.attribute("", "System Name"), Some("vdx-1"));
    assert_eq!(details.attribute("", "Model"), Some("Vdx6740"));
    assert_eq!(details.attribute("", "OS Version"), Some("7.0.1a"));

    let mut ids: Vec<&str> = details
        .resources
        .iter()
        .map(|r| r.unique_identifier.as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), details.resources.len());
}

#[tokio::test]
async fn test_os_validation() {
    let mut config = AutoloadConfig::default();
    config.discovery.validate_os = true;

    let device = TestDevice::new();
    assert!(discover(&device.source, &config).await.is_ok());

    let other = MemorySource::new("icx")
        .with_scalar(scalars::SYS_DESCR, "Brocade ICX7450-48, IronWare Version 08.0.30")
        .with_row(
            tables::ENT_PHYSICAL_TABLE,
            1u32,
            field_values! {
                "entPhysicalContainedIn" => "0",
                "entPhysicalParentRelPos" => "-1",
                "entPhysicalClass" => "chassis",
            },
        );
    let err = discover(&other, &config).await.unwrap_err();
    assert!(matches!(err, AutoloadError::UnsupportedOs { .. }));
}

#[tokio::test]
async fn test_every_retained_entity_resolves() {
    let device = TestDevice::new()
        .with_entity(5, 1, 3, "container", "Slot 3")
        .with_entity(50, 5, 1, "module", "MODULE 3")
        .with_entity(51, 50, 2, "module", "")
        .with_entity(60, 99, 1, "module", "")
        .with_entity(61, 60, 1, "port", "");
    let snapshot = DeviceSnapshot::collect(&device.source).await.unwrap();

    let mut inventory = classify(&snapshot.entities, &snapshot.interfaces, &[], &port_exclude());
    assert_eq!(inventory.exclude_orphans(), 0);
    assert!(inventory.is_excluded(60));
    assert!(inventory.is_excluded(61));

    let mut addresses = AddressTable::new();
    addresses.seed_chassis(&inventory);
    let active: Vec<u32> = inventory
        .entities()
        .map(|e| e.index)
        .filter(|i| inventory.is_active(*i))
        .collect();
    for index in active {
        let address = addresses
            .resolve(&inventory, NodeRef::Entity(index))
            .expect("address should resolve");
        assert!(!address.is_empty());
    }
    assert_eq!(addresses.get(NodeRef::Entity(51)), Some("0/3/2"));
}

#[tokio::test]
async fn test_discovery_from_json_snapshot_file() {
    let json = r#"{
        "tables": {
            "ENTITY-MIB::entPhysicalTable": {
                "1": { "entPhysicalContainedIn": 0, "entPhysicalParentRelPos": -1,
                       "entPhysicalClass": "chassis(3)", "entPhysicalModelName": "VDX6740" },
                "10": { "entPhysicalContainedIn": 1, "entPhysicalParentRelPos": 1,
                        "entPhysicalClass": "module(9)", "entPhysicalName": "MODULE 1" },
                "20": { "entPhysicalContainedIn": 1, "entPhysicalParentRelPos": 2,
                        "entPhysicalClass": "", "entPhysicalVendorType": "cevFan1" }
            },
            "IF-MIB::ifTable": {
                "1101": { "ifDescr": "TenGigabitEthernet 1/0/1", "ifType": "ethernetCsmacd",
                          "ifPhysAddress": "00:27:f8:a1:b2:c3", "ifMtu": 2500, "ifSpeed": 10000000000 },
                "2": { "ifDescr": "eth0", "ifType": "ethernetCsmacd" }
            }
        },
        "scalars": { "SNMPv2-MIB::sysName": "vdx-json" }
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdx.json");
    std::fs::write(&path, json).unwrap();

    let source = MemorySource::load_json_file(&path).await.unwrap();
    let details = discover(&source, &AutoloadConfig::default()).await.unwrap();

    assert_eq!(details.count(ResourceKind::Chassis), 1);
    assert_eq!(details.count(ResourceKind::Module), 1);
    assert_eq!(details.count(ResourceKind::Port), 1);
    assert_eq!(details.attribute("0", "Model"), Some("VDX6740"));
    assert_eq!(details.attribute("0/1/0-1", "MTU"), Some("2500"));
    assert_eq!(details.attribute("", "System Name"), Some("vdx-json"));
}

#[test]
fn test_discovery_is_reentrant() {
    let snapshot = DeviceSnapshot::default();
    let config = AutoloadConfig::default();
    let first = Discovery::new(&snapshot, &config).unwrap().run().unwrap();
    let second = Discovery::new(&snapshot, &config).unwrap().run().unwrap();
    assert_eq!(first, second);
}
