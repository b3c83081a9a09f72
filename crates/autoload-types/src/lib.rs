//! Typed primitives for SNMP topology autoload.
//!
//! Management tables hand back free-text values for things that are really
//! small closed sets. This crate gives them first-class types:
//!
//! - [`EntityClass`]: ENTITY-MIB physical class of an inventory row
//! - [`MacAddress`]: 48-bit MAC parsed from any of the common SNMP renderings
//! - [`Duplex`]: EtherLike-MIB duplex status of a port
//! - [`AutoNegotiation`]: MAU-MIB auto-negotiation admin status

mod class;
mod link;
mod mac;

pub use class::EntityClass;
pub use link::{AutoNegotiation, Duplex};
pub use mac::MacAddress;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid entity class: {0}")]
    InvalidEntityClass(String),
}
