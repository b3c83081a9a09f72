//! Best-effort neighbor lookup.
//!
//! The vendor CDP cache is consulted first, then the standard LLDP
//! local/remote table pair. Ports without a neighbor resolve to an empty
//! string.

use tracing::debug;

use crate::snapshot::DeviceSnapshot;
use crate::table::{FieldValues, FieldValuesExt, RowKey};
use crate::tables::fields;

fn through(device: &str, port: &str) -> String {
    format!("{} through {}", device, port)
}

fn pair<'a>(row: &'a FieldValues, device: &str, port: &str) -> Option<(&'a str, &'a str)> {
    Some((row.get_field(device)?, row.get_field(port)?))
}

/// CDP cache rows are keyed `<ifIndex>.<deviceIndex>`.
fn from_cdp(snapshot: &DeviceSnapshot, index: u32) -> Option<String> {
    snapshot
        .cdp_cache
        .iter()
        .filter(|(key, _)| key.leading_index() == Some(index))
        .find_map(|(_, row)| pair(row, fields::CDP_DEVICE_ID, fields::CDP_DEVICE_PORT))
        .map(|(device, port)| through(device, port))
}

/// Remote rows are keyed `<timeMark>.<localPortNum>.<remIndex>`; a row whose
/// key is the local port number itself is accepted as well.
fn remote_matches(remote: &RowKey, local: &RowKey) -> bool {
    remote == local || remote.components().nth(1) == Some(local.as_str())
}

fn from_lldp(snapshot: &DeviceSnapshot, descr: &str) -> Option<String> {
    if descr.is_empty() {
        return None;
    }
    let local = snapshot
        .lldp_local
        .iter()
        .find(|(_, row)| row.get_field(fields::LLDP_LOC_PORT_DESC).map(str::trim) == Some(descr))
        .map(|(key, _)| key)?;

    snapshot
        .lldp_remote
        .iter()
        .filter(|(key, _)| remote_matches(key, local))
        .find_map(|(_, row)| pair(row, fields::LLDP_REM_SYS_NAME, fields::LLDP_REM_PORT_DESC))
        .map(|(device, port)| through(device, port))
}

/// Neighbor of the port at `index` with description `descr`, formatted as
/// `"<device> through <port>"`.
pub fn adjacent(snapshot: &DeviceSnapshot, index: u32, descr: &str) -> String {
    let result = from_cdp(snapshot, index).or_else(|| from_lldp(snapshot, descr));
    match result {
        Some(neighbor) => {
            debug!("Interface {} is adjacent to {}", index, neighbor);
            neighbor
        }
        None => String::new(),
    }
}
