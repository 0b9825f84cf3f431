//! Record types assembled from `nmcli` terse output.
//!
//! Field names on the serialized records are a wire contract shared with
//! the pre-existing consumers of this service (including the legacy
//! `hdaddr` spelling) and must not be renamed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connectivity class an interface or saved connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Wifi,
    Ethernet,
}

impl LinkType {
    /// The TYPE value `nmcli device` reports for this class.
    pub(crate) fn device_type(self) -> &'static str {
        match self {
            LinkType::Wifi => "wifi",
            LinkType::Ethernet => "ethernet",
        }
    }

    /// The TYPE value `nmcli connection` reports for this class.
    pub(crate) fn connection_type(self) -> &'static str {
        match self {
            LinkType::Wifi => "802-11-wireless",
            LinkType::Ethernet => "802-3-ethernet",
        }
    }
}

/// Device name → connectivity state, one entry per managed interface.
pub type InterfaceMap = BTreeMap<String, String>;

/// One saved connection profile, keyed by UUID in [`ConnectionMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionEntry {
    pub name: String,
    pub device: String,
}

/// Connection UUID → profile entry, scoped to one [`LinkType`].
pub type ConnectionMap = BTreeMap<String, ConnectionEntry>;

/// One visible access point, keyed by SSID in [`ScanMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPoint {
    pub mode: String,
    pub channel: String,
    pub rate: String,
    pub signal: String,
    pub encryption: String,
}

/// SSID → access point. Multiple APs sharing an SSID collapse to one
/// entry, last row wins.
pub type ScanMap = BTreeMap<String, AccessPoint>;

/// `GENERAL.*` properties of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdaddr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
}

/// `IP4.*` or `IP6.*` properties of one interface. Addresses and DNS
/// servers accumulate in dump order; the gateway is a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpGroup {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

/// Detail tree for one interface, as reported by `nmcli device show`.
///
/// Every group is created lazily on the first property observed for it,
/// so a group key is absent from the serialized output when the dump
/// contained nothing for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<IpGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<IpGroup>,
    /// Carrier-detect flag, wired links only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wirestate: Option<String>,
}

impl InterfaceDetail {
    pub(crate) fn general_mut(&mut self) -> &mut GeneralGroup {
        self.general.get_or_insert_with(GeneralGroup::default)
    }

    pub(crate) fn ipv4_mut(&mut self) -> &mut IpGroup {
        self.ipv4.get_or_insert_with(IpGroup::default)
    }

    pub(crate) fn ipv6_mut(&mut self) -> &mut IpGroup {
        self.ipv6.get_or_insert_with(IpGroup::default)
    }
}

/// Parameters for creating and activating a new Wi-Fi connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub ssid: String,
    /// Pre-shared key; omit for open networks.
    pub password: Option<String>,
    /// Interface to bind the connection to.
    pub iface: Option<String>,
    /// Profile name; `nmcli` derives one from the SSID when omitted.
    pub name: Option<String>,
    /// Seconds to wait for activation, passed to `nmcli --wait`.
    pub timeout: Option<u32>,
}
