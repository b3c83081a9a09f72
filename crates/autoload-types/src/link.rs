//! Link settings reported per port.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Duplex mode of a port.
///
/// Ports default to full duplex; only an explicit half-duplex report from
/// `dot3StatsDuplexStatus` changes that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Duplex {
    #[default]
    Full,
    Half,
}

impl Duplex {
    /// Maps a `dot3StatsDuplexStatus` value (`halfDuplex`, `fullDuplex(3)`,
    /// `unknown`, ...) onto a duplex mode.
    pub fn from_status(status: &str) -> Self {
        if status.to_lowercase().contains("halfduplex") {
            Duplex::Half
        } else {
            Duplex::Full
        }
    }
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duplex::Full => write!(f, "Full"),
            Duplex::Half => write!(f, "Half"),
        }
    }
}

/// Auto-negotiation admin status (`ifMauAutoNegAdminStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutoNegotiation {
    Enabled,
    #[default]
    Disabled,
}

impl AutoNegotiation {
    /// Only an explicit `enabled` status turns auto-negotiation on.
    pub fn from_admin_status(status: &str) -> Self {
        if status.to_lowercase().contains("enabled") {
            AutoNegotiation::Enabled
        } else {
            AutoNegotiation::Disabled
        }
    }

    pub const fn is_enabled(&self) -> bool {
        matches!(self, AutoNegotiation::Enabled)
    }
}

/// Rendered as the inventory flag value (`True`/`False`).
impl fmt::Display for AutoNegotiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoNegotiation::Enabled => write!(f, "True"),
            AutoNegotiation::Disabled => write!(f, "False"),
        }
    }
}
