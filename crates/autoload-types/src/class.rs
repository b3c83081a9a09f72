//! ENTITY-MIB physical class.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical class of an inventory row (`entPhysicalClass`).
///
/// Discriminants follow the `PhysicalClass` textual convention so that
/// numeric renderings from the agent decode directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityClass {
    Other = 1,
    Unknown = 2,
    Chassis = 3,
    Backplane = 4,
    /// Slot or bay; never addressable on its own.
    Container = 5,
    PowerSupply = 6,
    Fan = 7,
    Sensor = 8,
    Module = 9,
    Port = 10,
    Stack = 11,
    Cpu = 12,
}

impl EntityClass {
    /// Decodes the numeric `PhysicalClass` value.
    pub const fn from_code(code: u32) -> Option<Self> {
        let class = match code {
            1 => EntityClass::Other,
            2 => EntityClass::Unknown,
            3 => EntityClass::Chassis,
            4 => EntityClass::Backplane,
            5 => EntityClass::Container,
            6 => EntityClass::PowerSupply,
            7 => EntityClass::Fan,
            8 => EntityClass::Sensor,
            9 => EntityClass::Module,
            10 => EntityClass::Port,
            11 => EntityClass::Stack,
            12 => EntityClass::Cpu,
            _ => return None,
        };
        Some(class)
    }

    /// Infers a class from a free-text vendor type such as
    /// `cevContainerSlot` or `cevPowerSupplyAC`.
    ///
    /// Only the structural classes are inferred; anything else is `None`.
    pub fn infer_from_vendor_type(vendor_type: &str) -> Option<Self> {
        let vendor_type = vendor_type.to_lowercase();
        [
            ("container", EntityClass::Container),
            ("chassis", EntityClass::Chassis),
            ("module", EntityClass::Module),
            ("port", EntityClass::Port),
            ("powersupply", EntityClass::PowerSupply),
        ]
        .into_iter()
        .find(|(needle, _)| vendor_type.contains(needle))
        .map(|(_, class)| class)
    }

    /// Returns true for classes kept in the working inventory.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            EntityClass::Stack
                | EntityClass::Chassis
                | EntityClass::Module
                | EntityClass::Port
                | EntityClass::PowerSupply
                | EntityClass::Container
                | EntityClass::Backplane
        )
    }

    /// Returns true for grouping classes that donate their own ordinal to
    /// their children instead of taking an address segment.
    pub const fn is_transparent(&self) -> bool {
        matches!(self, EntityClass::Container | EntityClass::Backplane)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityClass::Other => "other",
            EntityClass::Unknown => "unknown",
            EntityClass::Chassis => "chassis",
            EntityClass::Backplane => "backplane",
            EntityClass::Container => "container",
            EntityClass::PowerSupply => "powerSupply",
            EntityClass::Fan => "fan",
            EntityClass::Sensor => "sensor",
            EntityClass::Module => "module",
            EntityClass::Port => "port",
            EntityClass::Stack => "stack",
            EntityClass::Cpu => "cpu",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityClass {
    type Err = ParseError;

    /// Accepts `chassis`, `'chassis'`, `chassis(3)` and `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().trim_matches(|c| c == '\'' || c == '"');
        let name = cleaned.split('(').next().unwrap_or_default().trim();

        if let Ok(code) = name.parse::<u32>() {
            return EntityClass::from_code(code)
                .ok_or_else(|| ParseError::InvalidEntityClass(s.to_string()));
        }

        match name.to_lowercase().as_str() {
            "other" => Ok(EntityClass::Other),
            "unknown" => Ok(EntityClass::Unknown),
            "chassis" => Ok(EntityClass::Chassis),
            "backplane" => Ok(EntityClass::Backplane),
            "container" => Ok(EntityClass::Container),
            "powersupply" => Ok(EntityClass::PowerSupply),
            "fan" => Ok(EntityClass::Fan),
            "sensor" => Ok(EntityClass::Sensor),
            "module" => Ok(EntityClass::Module),
            "port" => Ok(EntityClass::Port),
            "stack" => Ok(EntityClass::Stack),
            "cpu" => Ok(EntityClass::Cpu),
            _ => Err(ParseError::InvalidEntityClass(s.to_string())),
        }
    }
}
