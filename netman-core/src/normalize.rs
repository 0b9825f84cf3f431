//! Folds parsed terse output into the record types in [`crate::model`].
//!
//! These are pure functions: one per query shape, consuming the row or
//! pair sequence produced by [`crate::terse`]. Row arity is enforced here
//! with a typed [`Error::FieldCount`] so a format drift in the external
//! tool surfaces instead of yielding silently truncated records.

use crate::model::{
    AccessPoint, ConnectionEntry, ConnectionMap, InterfaceDetail, InterfaceMap, LinkType, ScanMap,
};
use crate::{Error, Result};

/// Interfaces in this state are administratively invisible to us.
const EXCLUDED_STATE: &str = "unmanaged";

/// Folds `DEVICE:TYPE:STATE` rows into a device → state map for one link
/// type, dropping unmanaged interfaces. `nmcli` emits one row per device;
/// should a duplicate appear anyway, the last row wins.
pub fn interface_map<I>(rows: I, want: LinkType) -> Result<InterfaceMap>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut map = InterfaceMap::new();
    for row in rows {
        let [device, dev_type, state] = destructure(row)?;
        if dev_type == want.device_type() && state != EXCLUDED_STATE {
            map.insert(device, state);
        }
    }
    Ok(map)
}

/// Folds `NAME:UUID:TYPE:DEVICE` rows into a UUID → profile map for one
/// connection type.
pub fn connection_map<I>(rows: I, want: LinkType) -> Result<ConnectionMap>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut map = ConnectionMap::new();
    for row in rows {
        let [name, uuid, conn_type, device] = destructure(row)?;
        if conn_type == want.connection_type() {
            map.insert(uuid, ConnectionEntry { name, device });
        }
    }
    Ok(map)
}

/// Folds `SSID:MODE:CHAN:RATE:SIGNAL:SECURITY` rows into an SSID-keyed
/// map. Keying by SSID is lossy: access points sharing an SSID collapse
/// to the last row seen.
pub fn scan_map<I>(rows: I) -> Result<ScanMap>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut map = ScanMap::new();
    for row in rows {
        let [ssid, mode, channel, rate, signal, encryption] = destructure(row)?;
        map.insert(
            ssid,
            AccessPoint {
                mode,
                channel,
                rate,
                signal,
                encryption,
            },
        );
    }
    Ok(map)
}

fn destructure<const N: usize>(row: Vec<String>) -> Result<[String; N]> {
    <[String; N]>::try_from(row).map_err(|row| Error::FieldCount {
        expected: N,
        got: row.len(),
    })
}

/// One `nmcli device show` property, classified from its raw key.
///
/// The `[N]` index suffix `nmcli` appends to repeated properties is
/// stripped before matching; keys this enum does not name are ignored so
/// newer tool versions can add properties without breaking us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailKey {
    HwAddr,
    DeviceState,
    ActiveConnection,
    V4Address,
    V4Dns,
    V4Gateway,
    V6Address,
    V6Dns,
    V6Gateway,
    Carrier,
    Other,
}

fn classify(raw_key: &str) -> DetailKey {
    let key = raw_key.split('[').next().unwrap_or(raw_key);
    match key {
        "GENERAL.HWADDR" => DetailKey::HwAddr,
        "GENERAL.STATE" => DetailKey::DeviceState,
        "GENERAL.CONNECTION" => DetailKey::ActiveConnection,
        "IP4.ADDRESS" => DetailKey::V4Address,
        "IP4.DNS" => DetailKey::V4Dns,
        "IP4.GATEWAY" => DetailKey::V4Gateway,
        "IP6.ADDRESS" => DetailKey::V6Address,
        "IP6.DNS" => DetailKey::V6Dns,
        "IP6.GATEWAY" => DetailKey::V6Gateway,
        "WIRED-PROPERTIES.CARRIER" => DetailKey::Carrier,
        _ => DetailKey::Other,
    }
}

/// Builds the detail tree from a `KEY:VALUE` property dump in a single
/// pass. Groups are created lazily on first write; repeated properties
/// append in dump order, singular ones are last-wins.
pub fn detail_tree<I>(pairs: I) -> Result<InterfaceDetail>
where
    I: IntoIterator<Item = Result<(String, String)>>,
{
    let mut detail = InterfaceDetail::default();
    for pair in pairs {
        let (key, value) = pair?;
        match classify(&key) {
            DetailKey::HwAddr => detail.general_mut().hdaddr = Some(value),
            DetailKey::DeviceState => detail.general_mut().state = Some(value),
            DetailKey::ActiveConnection => detail.general_mut().connection = Some(value),
            DetailKey::V4Address => detail.ipv4_mut().address.push(value),
            DetailKey::V4Dns => detail.ipv4_mut().dns.push(value),
            DetailKey::V4Gateway => detail.ipv4_mut().gateway = Some(value),
            DetailKey::V6Address => detail.ipv6_mut().address.push(value),
            DetailKey::V6Dns => detail.ipv6_mut().dns.push(value),
            DetailKey::V6Gateway => detail.ipv6_mut().gateway = Some(value),
            DetailKey::Carrier => detail.wirestate = Some(value),
            DetailKey::Other => {}
        }
    }
    Ok(detail)
}
