//! The tabular data source seam.
//!
//! The engine never talks to a device. It consumes whatever a
//! [`TableSource`] hands back: pre-decoded rows keyed by OID suffix.
//! Transport, retries and caching belong to the implementor.
//!
//! [`MemorySource`] is the in-process implementation, fed either
//! programmatically or from a JSON snapshot document:
//!
//! ```json
//! {
//!   "tables": {
//!     "ENTITY-MIB::entPhysicalTable": {
//!       "1": { "entPhysicalClass": "chassis", "entPhysicalContainedIn": "0" }
//!     }
//!   },
//!   "scalars": { "SNMPv2-MIB::sysName": "vdx-1" }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;
use crate::table::{FieldValues, RowKey, Table};

/// Supplier of table snapshots and single-value lookups.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Returns the source name (for logging).
    fn name(&self) -> &str;

    /// Fetches every row of a table. A table the device does not implement
    /// is an empty table, not an error.
    async fn table(&self, table: &str) -> Result<Table, SourceError>;

    /// Fetches a single scalar value.
    async fn scalar(&self, name: &str) -> Result<String, SourceError>;
}

/// In-memory table source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    tables: HashMap<String, Table>,
    scalars: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    tables: BTreeMap<String, BTreeMap<String, BTreeMap<String, Value>>>,
    #[serde(default)]
    scalars: BTreeMap<String, Value>,
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds one row to a table, creating the table if needed.
    pub fn with_row(mut self, table: &str, key: impl Into<RowKey>, row: FieldValues) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key, row);
        self
    }

    /// Adds (or replaces) a scalar.
    pub fn with_scalar(mut self, name: &str, value: impl Into<String>) -> Self {
        self.scalars.insert(name.to_string(), value.into());
        self
    }

    /// Parses a JSON snapshot document.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, SourceError> {
        let name = name.into();
        let doc: SnapshotDocument =
            serde_json::from_str(json).map_err(|e| SourceError::Decode {
                path: name.clone(),
                message: e.to_string(),
            })?;

        let tables = doc
            .tables
            .into_iter()
            .map(|(table_name, rows)| {
                let table: Table = rows
                    .into_iter()
                    .map(|(key, row)| {
                        let fvs: FieldValues = row
                            .into_iter()
                            .map(|(field, value)| (field, value_to_string(value)))
                            .collect();
                        (RowKey::from(key), fvs)
                    })
                    .collect();
                (table_name, table)
            })
            .collect();

        let scalars = doc
            .scalars
            .into_iter()
            .map(|(k, v)| (k, value_to_string(v)))
            .collect();

        Ok(Self {
            name,
            tables,
            scalars,
        })
    }

    /// Reads a JSON snapshot document from disk.
    pub async fn load_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(path.display().to_string(), &content)
    }
}

#[async_trait]
impl TableSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn table(&self, table: &str) -> Result<Table, SourceError> {
        let rows = self.tables.get(table).cloned().unwrap_or_default();
        debug!("{}: {} rows from {}", self.name, rows.len(), table);
        Ok(rows)
    }

    async fn scalar(&self, name: &str) -> Result<String, SourceError> {
        self.scalars
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::MissingScalar(name.to_string()))
    }
}
