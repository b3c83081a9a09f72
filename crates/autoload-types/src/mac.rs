//! MAC address type covering the renderings SNMP agents produce for
//! `ifPhysAddress`.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet MAC address.
///
/// # Examples
///
/// ```
/// use sonic_autoload_types::MacAddress;
///
/// let mac: MacAddress = "0x0027f8a1b2c3".parse().unwrap();
/// assert_eq!(mac.to_string(), "00:27:f8:a1:b2:c3");
///
/// let dotted: MacAddress = "0027.f8a1.b2c3".parse().unwrap();
/// assert_eq!(mac, dotted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a new MAC address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Returns the raw bytes of the MAC address.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    fn from_hex_digits(digits: &str, original: &str) -> Result<Self, ParseError> {
        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidMacAddress(original.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| ParseError::InvalidMacAddress(original.to_string()))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| ParseError::InvalidMacAddress(original.to_string()))?;
        }
        Ok(MacAddress(bytes))
    }

    fn from_octets(parts: &[&str], original: &str) -> Result<Self, ParseError> {
        if parts.len() != 6 {
            return Err(ParseError::InvalidMacAddress(original.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (byte, part) in bytes.iter_mut().zip(parts) {
            if part.is_empty() || part.len() > 2 {
                return Err(ParseError::InvalidMacAddress(original.to_string()));
            }
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| ParseError::InvalidMacAddress(original.to_string()))?;
        }
        Ok(MacAddress(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            return MacAddress::from_hex_digits(hex, s);
        }

        for separator in [':', '-', ' '] {
            if trimmed.contains(separator) {
                let parts: Vec<&str> = trimmed.split(separator).collect();
                return MacAddress::from_octets(&parts, s);
            }
        }

        // Cisco-style dotted quads: 0027.f8a1.b2c3
        if trimmed.contains('.') {
            let groups: Vec<&str> = trimmed.split('.').collect();
            if groups.len() != 3 || groups.iter().any(|g| g.len() != 4) {
                return Err(ParseError::InvalidMacAddress(s.to_string()));
            }
            return MacAddress::from_hex_digits(&groups.concat(), s);
        }

        MacAddress::from_hex_digits(trimmed, s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> String {
        mac.to_string()
    }
}
