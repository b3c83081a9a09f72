//! Error types for autoload operations.
//!
//! Only [`AutoloadError`] ever reaches the caller of a discovery run.
//! [`AddressError`] is scoped to a single node: the node is logged and
//! skipped, the run carries on.

use thiserror::Error;

use crate::address::NodeRef;

/// Result type alias for autoload operations.
pub type AutoloadResult<T> = Result<T, AutoloadError>;

/// Errors raised by a [`TableSource`](crate::source::TableSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the backing store failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The backing store could not be decoded.
    #[error("Failed to decode snapshot {path}: {message}")]
    Decode {
        /// Path of the snapshot.
        path: String,
        /// Decoder message.
        message: String,
    },

    /// A single-value lookup has no value.
    #[error("Scalar '{0}' not available")]
    MissingScalar(String),

    /// Transport-level failure reported by the source.
    #[error("Table '{table}' unavailable: {message}")]
    Unavailable {
        /// Table name.
        table: String,
        /// Error message.
        message: String,
    },
}

/// Per-node address resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The node (or a parent on its chain) is not in the working table.
    #[error("{0} is not in the working inventory")]
    UnknownNode(NodeRef),

    /// The parent chain loops back onto itself.
    #[error("Parent chain of {0} contains a cycle")]
    Cycle(NodeRef),

    /// The interface description carries no `<slot>/<port>` suffix.
    #[error("Interface {index} description '{descr}' has no slot/port suffix")]
    UndecodablePort {
        /// Interface index.
        index: u32,
        /// The raw description.
        descr: String,
    },

    /// No `MODULE <slot>` entity hosts the port.
    #[error("Interface {index} references slot {slot} but no 'MODULE {slot}' was discovered")]
    MissingModule {
        /// Interface index.
        index: u32,
        /// Decoded slot.
        slot: u32,
    },
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A field failed validation.
    #[error("Invalid configuration for {field}: {message}")]
    Invalid {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that abort a discovery run.
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// The physical inventory table is empty or unreadable.
    #[error("Cannot load entPhysicalTable, autoload cannot continue")]
    EmptyInventory,

    /// The device does not run a supported OS family.
    #[error("Incompatible driver! Please use correct resource driver for {supported} operation system(s)")]
    UnsupportedOs {
        /// Supported OS families, comma separated.
        supported: String,
        /// The device's system description.
        description: String,
    },

    /// The data source failed.
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AutoloadError {
    /// Returns true if this error ends the discovery run.
    ///
    /// Source errors on optional tables are downgraded before they reach
    /// this type, so everything here is fatal except a transient
    /// unavailability that a caller may retry.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AutoloadError::Source(SourceError::Unavailable { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AutoloadError::EmptyInventory.to_string(),
            "Cannot load entPhysicalTable, autoload cannot continue"
        );
    }

    #[test]
    fn test_unsupported_os_message() {
        let err = AutoloadError::UnsupportedOs {
            supported: "VDX".to_string(),
            description: "Cisco IOS".to_string(),
        };
        assert!(err.to_string().contains("VDX"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_address_error_display() {
        let err = AddressError::MissingModule { index: 1201, slot: 3 };
        assert_eq!(
            err.to_string(),
            "Interface 1201 references slot 3 but no 'MODULE 3' was discovered"
        );
        assert_eq!(
            AddressError::Cycle(NodeRef::Entity(7)).to_string(),
            "Parent chain of entity 7 contains a cycle"
        );
    }

    #[test]
    fn test_is_fatal() {
        let transient = AutoloadError::Source(SourceError::Unavailable {
            table: "ifTable".to_string(),
            message: "timeout".to_string(),
        });
        assert!(!transient.is_fatal());
        assert!(AutoloadError::Source(SourceError::MissingScalar("sysName".into())).is_fatal());
    }
}
