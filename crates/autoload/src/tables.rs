//! Table, scalar and column name constants.
//!
//! Names follow the MIB object names so a snapshot taken by any SNMP walker
//! can be fed in without renaming.

/// Physical inventory (ENTITY-MIB).
pub const ENT_PHYSICAL_TABLE: &str = "ENTITY-MIB::entPhysicalTable";

/// Interface table (IF-MIB).
pub const IF_TABLE: &str = "IF-MIB::ifTable";

/// Interface aliases (IF-MIB ifXTable, `ifAlias` column).
pub const IF_ALIAS_TABLE: &str = "IF-MIB::ifXTable";

/// LAG membership (IEEE8023-LAG-MIB).
pub const LAG_PORT_TABLE: &str = "IEEE8023-LAG-MIB::dot3adAggPortTable";

/// IPv4 address to interface mapping (IP-MIB).
pub const IPV4_ADDR_TABLE: &str = "IP-MIB::ipAddrTable";

/// IPv6 address to interface mapping (IPV6-MIB).
pub const IPV6_ADDR_TABLE: &str = "IPV6-MIB::ipv6AddrTable";

/// Duplex status (EtherLike-MIB).
pub const DUPLEX_TABLE: &str = "EtherLike-MIB::dot3StatsTable";

/// Auto-negotiation admin status (MAU-MIB), keyed `<ifIndex>.<mauIndex>`.
pub const MAU_AUTONEG_TABLE: &str = "MAU-MIB::ifMauAutoNegTable";

/// Vendor neighbor cache (CDP), keyed `<ifIndex>.<deviceIndex>`.
pub const CDP_CACHE_TABLE: &str = "BROCADE-CDP-MIB::cdpCacheTable";

/// LLDP local port table, keyed by local port number.
pub const LLDP_LOCAL_PORT_TABLE: &str = "LLDP-MIB::lldpLocPortTable";

/// LLDP remote systems table, keyed `<timeMark>.<localPort>.<remIndex>`.
pub const LLDP_REMOTE_TABLE: &str = "LLDP-MIB::lldpRemTable";

/// Every table a discovery run reads, in fetch order.
pub const ALL_TABLES: &[&str] = &[
    ENT_PHYSICAL_TABLE,
    IF_TABLE,
    IF_ALIAS_TABLE,
    LAG_PORT_TABLE,
    IPV4_ADDR_TABLE,
    IPV6_ADDR_TABLE,
    DUPLEX_TABLE,
    MAU_AUTONEG_TABLE,
    CDP_CACHE_TABLE,
    LLDP_LOCAL_PORT_TABLE,
    LLDP_REMOTE_TABLE,
];

/// System scalars (SNMPv2-MIB and vendor firmware object).
pub mod scalars {
    pub const SYS_DESCR: &str = "SNMPv2-MIB::sysDescr";
    pub const SYS_NAME: &str = "SNMPv2-MIB::sysName";
    pub const SYS_LOCATION: &str = "SNMPv2-MIB::sysLocation";
    pub const SYS_CONTACT: &str = "SNMPv2-MIB::sysContact";
    pub const SYS_OBJECT_ID: &str = "SNMPv2-MIB::sysObjectID";
    /// Vendor firmware version object, used when `sysDescr` has no version.
    pub const FIRMWARE_VERSION: &str = "SW-MIB::swFirmwareVersion";

    pub const ALL: &[&str] = &[
        SYS_DESCR,
        SYS_NAME,
        SYS_LOCATION,
        SYS_CONTACT,
        SYS_OBJECT_ID,
        FIRMWARE_VERSION,
    ];
}

/// Column names used in table rows.
pub mod fields {
    // entPhysicalTable
    pub const ENT_CONTAINED_IN: &str = "entPhysicalContainedIn";
    pub const ENT_PARENT_REL_POS: &str = "entPhysicalParentRelPos";
    pub const ENT_CLASS: &str = "entPhysicalClass";
    pub const ENT_VENDOR_TYPE: &str = "entPhysicalVendorType";
    pub const ENT_DESCR: &str = "entPhysicalDescr";
    pub const ENT_NAME: &str = "entPhysicalName";
    pub const ENT_MODEL_NAME: &str = "entPhysicalModelName";
    pub const ENT_SERIAL_NUM: &str = "entPhysicalSerialNum";
    pub const ENT_SOFTWARE_REV: &str = "entPhysicalSoftwareRev";
    pub const ENT_HARDWARE_REV: &str = "entPhysicalHardwareRev";

    // ifTable / ifXTable
    pub const IF_DESCR: &str = "ifDescr";
    pub const IF_TYPE: &str = "ifType";
    pub const IF_PHYS_ADDRESS: &str = "ifPhysAddress";
    pub const IF_MTU: &str = "ifMtu";
    pub const IF_SPEED: &str = "ifSpeed";
    pub const IF_ALIAS: &str = "ifAlias";

    // dot3adAggPortTable
    pub const LAG_ATTACHED_AGG_ID: &str = "dot3adAggPortAttachedAggID";

    // ipAddrTable / ipv6AddrTable
    pub const IPV4_IF_INDEX: &str = "ipAdEntIfIndex";
    pub const IPV6_IF_INDEX: &str = "ipv6AddrIfIndex";

    // dot3StatsTable
    pub const DUPLEX_INDEX: &str = "dot3StatsIndex";
    pub const DUPLEX_STATUS: &str = "dot3StatsDuplexStatus";

    // ifMauAutoNegTable
    pub const MAU_AUTONEG_ADMIN_STATUS: &str = "ifMauAutoNegAdminStatus";

    // cdpCacheTable
    pub const CDP_DEVICE_ID: &str = "cdpCacheDeviceId";
    pub const CDP_DEVICE_PORT: &str = "cdpCacheDevicePort";

    // lldpLocPortTable / lldpRemTable
    pub const LLDP_LOC_PORT_DESC: &str = "lldpLocPortDesc";
    pub const LLDP_REM_SYS_NAME: &str = "lldpRemSysName";
    pub const LLDP_REM_PORT_DESC: &str = "lldpRemPortDesc";
}
