//! One immutable snapshot of every table a discovery run reads.
//!
//! Tables are fetched exactly once, up front. Nothing in the engine goes
//! back to the source after [`DeviceSnapshot::collect`] returns.

use tracing::{info, instrument, warn};

use crate::error::{AutoloadError, AutoloadResult};
use crate::source::TableSource;
use crate::table::Table;
use crate::tables::{self, scalars};

/// System group scalars. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub description: String,
    pub name: String,
    pub location: String,
    pub contact: String,
    pub object_id: String,
    pub firmware_version: String,
}

/// All source tables for one device.
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    pub system: SystemInfo,
    pub entities: Table,
    pub interfaces: Table,
    pub if_aliases: Table,
    pub lag_ports: Table,
    pub ipv4_addresses: Table,
    pub ipv6_addresses: Table,
    pub duplex: Table,
    pub auto_negotiation: Table,
    pub cdp_cache: Table,
    pub lldp_local: Table,
    pub lldp_remote: Table,
}

async fn optional_table(source: &dyn TableSource, name: &str) -> Table {
    match source.table(name).await {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to load {}, continuing without it: {}", name, e);
            Table::new()
        }
    }
}

async fn optional_scalar(source: &dyn TableSource, name: &str) -> String {
    source.scalar(name).await.unwrap_or_else(|e| {
        tracing::debug!("{}", e);
        String::new()
    })
}

impl DeviceSnapshot {
    /// Fetches every table once.
    ///
    /// The inventory and interface tables are required; the rest degrade to
    /// empty tables with a warning.
    #[instrument(skip(source), fields(table_source = %source.name()))]
    pub async fn collect(source: &dyn TableSource) -> AutoloadResult<Self> {
        info!("Start loading MIB tables");

        let entities = source.table(tables::ENT_PHYSICAL_TABLE).await?;
        if entities.is_empty() {
            return Err(AutoloadError::EmptyInventory);
        }
        info!("Entity table loaded ({} rows)", entities.len());

        let interfaces = source.table(tables::IF_TABLE).await?;
        info!("Interface table loaded ({} rows)", interfaces.len());

        let snapshot = Self {
            system: SystemInfo {
                description: optional_scalar(source, scalars::SYS_DESCR).await,
                name: optional_scalar(source, scalars::SYS_NAME).await,
                location: optional_scalar(source, scalars::SYS_LOCATION).await,
                contact: optional_scalar(source, scalars::SYS_CONTACT).await,
                object_id: optional_scalar(source, scalars::SYS_OBJECT_ID).await,
                firmware_version: optional_scalar(source, scalars::FIRMWARE_VERSION).await,
            },
            entities,
            interfaces,
            if_aliases: optional_table(source, tables::IF_ALIAS_TABLE).await,
            lag_ports: optional_table(source, tables::LAG_PORT_TABLE).await,
            ipv4_addresses: optional_table(source, tables::IPV4_ADDR_TABLE).await,
            ipv6_addresses: optional_table(source, tables::IPV6_ADDR_TABLE).await,
            duplex: optional_table(source, tables::DUPLEX_TABLE).await,
            auto_negotiation: optional_table(source, tables::MAU_AUTONEG_TABLE).await,
            cdp_cache: optional_table(source, tables::CDP_CACHE_TABLE).await,
            lldp_local: optional_table(source, tables::LLDP_LOCAL_PORT_TABLE).await,
            lldp_remote: optional_table(source, tables::LLDP_REMOTE_TABLE).await,
        };

        info!("MIB tables loaded successfully");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::field_values;
    use crate::source::MemorySource;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_collect_empty_inventory_is_fatal() {
        let source = MemorySource::new("empty");
        let err = DeviceSnapshot::collect(&source).await.unwrap_err();
        assert!(matches!(err, AutoloadError::EmptyInventory));
    }

    #[tokio::test]
    async fn test_collect_reads_tables_and_scalars() {
        let source = MemorySource::new("vdx")
            .with_row(
                tables::ENT_PHYSICAL_TABLE,
                1u32,
                field_values! { "entPhysicalClass" => "chassis" },
            )
            .with_scalar(scalars::SYS_NAME, "vdx-1");

        let snapshot = DeviceSnapshot::collect(&source).await.unwrap();
        assert_eq!(snapshot.entities.len(), 1);
        assert!(snapshot.interfaces.is_empty());
        assert_eq!(snapshot.system.name, "vdx-1");
        assert_eq!(snapshot.system.description, "");
    }

    /// Source whose optional tables all fail.
    struct FlakySource(MemorySource);

    #[async_trait]
    impl TableSource for FlakySource {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn table(&self, table: &str) -> Result<Table, SourceError> {
            if table == tables::ENT_PHYSICAL_TABLE || table == tables::IF_TABLE {
                self.0.table(table).await
            } else {
                Err(SourceError::Unavailable {
                    table: table.to_string(),
                    message: "timeout".to_string(),
                })
            }
        }

        async fn scalar(&self, name: &str) -> Result<String, SourceError> {
            self.0.scalar(name).await
        }
    }

    #[tokio::test]
    async fn test_collect_degrades_optional_tables() {
        let inner = MemorySource::new("inner").with_row(
            tables::ENT_PHYSICAL_TABLE,
            1u32,
            field_values! { "entPhysicalClass" => "chassis" },
        );
        let snapshot = DeviceSnapshot::collect(&FlakySource(inner)).await.unwrap();
        assert!(snapshot.lag_ports.is_empty());
        assert!(snapshot.lldp_remote.is_empty());
    }
}
