//! Device-level (root) attributes and OS family validation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use crate::config::DiscoveryConfig;
use crate::error::{AutoloadError, AutoloadResult};
use crate::resource::{attributes, AutoloadDetails};
use crate::snapshot::SystemInfo;

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Version\s+(?P<version>\S+)\S*\s+").expect("Invalid regex pattern"));

static PRODUCT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?P<id>\d+)$").expect("Invalid regex pattern"));

static SYMBOLIC_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"::(?P<name>\S+)$").expect("Invalid regex pattern"));

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Device model derived from `sysObjectID`.
///
/// A numeric product id found in `models` wins; otherwise the symbolic
/// `MIB::name` suffix is used. Both are capitalized.
pub fn device_model(object_id: &str, models: &BTreeMap<String, String>) -> String {
    let object_id = object_id.trim();
    let mapped = PRODUCT_ID_RE
        .captures(object_id)
        .and_then(|caps| models.get(&caps["id"]))
        .map(|model| capitalize(&model.replace('_', "")));

    mapped
        .or_else(|| {
            SYMBOLIC_NAME_RE
                .captures(object_id)
                .map(|caps| capitalize(&caps["name"]))
        })
        .unwrap_or_default()
}

/// Software version parsed from `sysDescr`, falling back to the firmware
/// version scalar.
pub fn os_version(system: &SystemInfo) -> String {
    VERSION_RE
        .captures(&system.description)
        .map(|caps| caps["version"].replace(',', ""))
        .unwrap_or_else(|| system.firmware_version.trim().to_string())
}

/// Appends the root attributes (relative address `""`).
pub fn add_root_attributes(
    details: &mut AutoloadDetails,
    system: &SystemInfo,
    config: &DiscoveryConfig,
    models: &BTreeMap<String, String>,
) {
    info!("Start loading Switch Attributes");
    details.add_root_attribute(attributes::SYSTEM_NAME, system.name.trim());
    details.add_root_attribute(attributes::VENDOR, config.vendor.as_str());
    details.add_root_attribute(attributes::MODEL, device_model(&system.object_id, models));
    details.add_root_attribute(attributes::LOCATION, system.location.trim());
    details.add_root_attribute(attributes::CONTACT_NAME, system.contact.trim());
    details.add_root_attribute(attributes::OS_VERSION, os_version(system));
    info!("Finished Loading Switch Attributes");
}

/// Checks that `sysDescr` names one of the supported OS families as a
/// whitespace-delimited token.
pub fn validate_os(system: &SystemInfo, supported: &[String]) -> AutoloadResult<()> {
    let description = system.description.to_uppercase();
    let found = description
        .split_whitespace()
        .any(|token| supported.iter().any(|os| os.to_uppercase() == token));
    if found {
        return Ok(());
    }

    info!("System description from device: '{}'", system.description);
    let err = AutoloadError::UnsupportedOs {
        supported: supported.join(", "),
        description: system.description.clone(),
    };
    error!("{}", err);
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn system(description: &str) -> SystemInfo {
        SystemInfo {
            description: description.to_string(),
            firmware_version: "v7.0.1".to_string(),
            ..SystemInfo::default()
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("VDX6740T"), "Vdx6740t");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_device_model_from_product_map() {
        let models = BTreeMap::from([("131".to_string(), "VDX_6740".to_string())]);
        assert_eq!(
            device_model("SNMPv2-SMI::enterprises.1588.3.3.1.131", &models),
            "Vdx6740"
        );
    }

    #[test]
    fn test_device_model_symbolic_fallback() {
        assert_eq!(
            device_model("BROCADE-PRODUCTS-MIB::brocadeVDX6740", &BTreeMap::new()),
            "Brocadevdx6740"
        );
        assert_eq!(device_model("", &BTreeMap::new()), "");
    }

    #[test]
    fn test_os_version() {
        let sys = system("Brocade VDX Switch, BR-VDX6740, Network Operating System Software Version 7.0.1a, Copyright");
        assert_eq!(os_version(&sys), "7.0.1a");
        assert_eq!(os_version(&system("Brocade VDX Switch")), "v7.0.1");
    }

    #[test]
    fn test_validate_os() {
        let supported = vec!["VDX".to_string()];
        assert!(validate_os(&system("Brocade VDX\nSwitch"), &supported).is_ok());
        assert!(validate_os(&system("Brocade vdx switch"), &supported).is_ok());

        let err = validate_os(&system("Brocade ICX7450"), &supported).unwrap_err();
        assert!(matches!(err, AutoloadError::UnsupportedOs { .. }));
        assert!(validate_os(&system("BR-VDX6740"), &supported).is_err());
    }

    #[test]
    fn test_root_attributes() {
        let mut details = AutoloadDetails::default();
        let sys = SystemInfo {
            name: "vdx-1".to_string(),
            location: "lab".to_string(),
            ..system("Software Version 7.0.1a, x")
        };
        add_root_attributes(&mut details, &sys, &DiscoveryConfig::default(), &BTreeMap::new());

        let names: Vec<&str> = details
            .attributes
            .iter()
            .map(|a| a.attribute_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["System Name", "Vendor", "Model", "Location", "Contact Name", "OS Version"]
        );
        assert_eq!(details.attribute("", "Vendor"), Some("Brocade"));
        assert_eq!(details.attribute("", "OS Version"), Some("7.0.1a"));
        assert!(details.resources.is_empty());
    }
}
