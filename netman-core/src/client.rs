//! High-level operations over the external tool.
//!
//! Every method is one synchronous round trip: validate parameters, build
//! the argument vector, run the tool, then either parse stdout into a
//! record or return the trimmed stderr as [`Error::CommandFailed`]. No
//! state is shared between calls and nothing is retried.

use crate::model::{
    ConnectRequest, ConnectionMap, InterfaceDetail, InterfaceMap, LinkType, ScanMap,
};
use crate::runner::{CommandRunner, NmcliRunner};
use crate::{Error, Result, normalize, terse};

/// Default `--wait` timeout for connection attempts, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u32 = 20;

/// Acknowledgement returned by operations whose tool output carries no
/// useful information.
const ACK_OK: &str = "ok";

pub struct NetworkClient<R = NmcliRunner> {
    runner: R,
}

impl NetworkClient {
    /// A client driving the real `nmcli` binary.
    pub fn new() -> Self {
        Self::with_runner(NmcliRunner)
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> NetworkClient<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Runs one invocation; stdout on success, trimmed stderr as the
    /// error otherwise.
    async fn invoke(&self, args: Vec<String>) -> Result<String> {
        let out = self.runner.run(&args).await?;
        if out.success {
            Ok(String::from_utf8_lossy(&out.stdout).into_owned())
        } else {
            Err(Error::CommandFailed(terse::sanitize(&out.stderr)))
        }
    }

    async fn interfaces(&self, want: LinkType) -> Result<InterfaceMap> {
        let out = self
            .invoke(args(&["-t", "-f", "DEVICE,TYPE,STATE", "device"]))
            .await?;
        normalize::interface_map(terse::parse_rows(&out), want)
    }

    /// Wi-Fi interfaces and their states, unmanaged ones excluded.
    pub async fn wifi_interfaces(&self) -> Result<InterfaceMap> {
        self.interfaces(LinkType::Wifi).await
    }

    /// Ethernet interfaces and their states, unmanaged ones excluded.
    pub async fn ethernet_interfaces(&self) -> Result<InterfaceMap> {
        self.interfaces(LinkType::Ethernet).await
    }

    /// Full property tree (general/ipv4/ipv6/carrier) for one interface.
    pub async fn interface_detail(&self, iface: &str) -> Result<InterfaceDetail> {
        if iface.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let out = self.invoke(args(&["-t", "device", "show", iface])).await?;
        normalize::detail_tree(terse::parse_pairs(&out))
    }

    /// Visible access points, keyed by SSID.
    pub async fn scan_results(&self) -> Result<ScanMap> {
        let out = self
            .invoke(args(&[
                "-t",
                "-f",
                "SSID,MODE,CHAN,RATE,SIGNAL,SECURITY",
                "device",
                "wifi",
            ]))
            .await?;
        normalize::scan_map(terse::parse_rows(&out))
    }

    async fn connections(&self, want: LinkType) -> Result<ConnectionMap> {
        let out = self
            .invoke(args(&["-t", "-f", "NAME,UUID,TYPE,DEVICE", "connection"]))
            .await?;
        normalize::connection_map(terse::parse_rows(&out), want)
    }

    /// Saved wireless connection profiles, keyed by UUID.
    pub async fn wifi_connections(&self) -> Result<ConnectionMap> {
        self.connections(LinkType::Wifi).await
    }

    /// Saved wired connection profiles, keyed by UUID.
    pub async fn ethernet_connections(&self) -> Result<ConnectionMap> {
        self.connections(LinkType::Ethernet).await
    }

    /// Brings up a saved connection, optionally bound to an interface.
    /// Returns the tool's trimmed acknowledgement line.
    pub async fn activate_connection(&self, id: &str, iface: Option<&str>) -> Result<String> {
        if id.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let mut argv = args(&["connection", "up", id]);
        if let Some(iface) = iface {
            argv.push("ifname".to_string());
            argv.push(iface.to_string());
        }
        let out = self.invoke(argv).await?;
        Ok(terse::sanitize(out.as_bytes()))
    }

    /// Creates and activates a Wi-Fi connection from `req`, waiting up to
    /// the request timeout (default [`DEFAULT_CONNECT_TIMEOUT`]).
    pub async fn create_wifi_connection(&self, req: &ConnectRequest) -> Result<String> {
        if req.ssid.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let timeout = req.timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        let mut argv = args(&["--wait", &timeout.to_string(), "device", "wifi", "connect"]);
        argv.push(req.ssid.clone());
        for (flag, value) in [
            ("password", &req.password),
            ("ifname", &req.iface),
            ("name", &req.name),
        ] {
            if let Some(value) = value {
                argv.push(flag.to_string());
                argv.push(value.clone());
            }
        }
        let out = self.invoke(argv).await?;
        Ok(terse::sanitize(out.as_bytes()))
    }

    /// Deletes a saved connection profile.
    pub async fn delete_connection(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.invoke(args(&["connection", "delete", id])).await?;
        Ok(ACK_OK.to_string())
    }

    /// Disconnects an interface and blocks it from autoconnecting.
    pub async fn disconnect(&self, iface: &str) -> Result<String> {
        if iface.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.invoke(args(&["device", "disconnect", iface])).await?;
        Ok(ACK_OK.to_string())
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ToolOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every invocation and replays a canned result.
    struct FakeRunner {
        calls: Mutex<Vec<Vec<String>>>,
        output: ToolOutput,
    }

    impl FakeRunner {
        fn succeeding(stdout: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                output: ToolOutput {
                    success: true,
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: Vec::new(),
                },
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                output: ToolOutput {
                    success: false,
                    stdout: Vec::new(),
                    stderr: stderr.as_bytes().to_vec(),
                },
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, args: &[String]) -> crate::Result<ToolOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.clone())
        }
    }

    fn client(runner: FakeRunner) -> NetworkClient<FakeRunner> {
        NetworkClient::with_runner(runner)
    }

    #[tokio::test]
    async fn wifi_interfaces_filters_and_builds_argv() {
        let client = client(FakeRunner::succeeding(
            "wlan0:wifi:connected\nlo:loopback:unmanaged\neth0:ethernet:connected\n",
        ));
        let map = client.wifi_interfaces().await.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["wlan0"], "connected");
        assert_eq!(
            client.runner.calls(),
            vec![vec!["-t", "-f", "DEVICE,TYPE,STATE", "device"]]
        );
    }

    #[tokio::test]
    async fn failure_carries_trimmed_stderr() {
        let client = client(FakeRunner::failing(
            "Error: Device 'wlan9' not found.\n",
        ));
        let err = client.wifi_interfaces().await.unwrap_err();
        match err {
            Error::CommandFailed(text) => {
                assert_eq!(text, "Error: Device 'wlan9' not found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn interface_detail_decodes_escaped_values() {
        let client = client(FakeRunner::succeeding(
            "GENERAL.HWADDR:AA\\:BB\\:CC\\:DD\\:EE\\:FF\nGENERAL.STATE:100 (connected)\nIP4.ADDRESS[1]:10.0.0.2/24\nIP6.ADDRESS[1]:fe80::1/64\n",
        ));
        let detail = client.interface_detail("wlan0").await.unwrap();
        assert_eq!(
            detail.general.unwrap().hdaddr.as_deref(),
            Some("AA:BB:CC:DD:EE:FF")
        );
        assert_eq!(detail.ipv6.unwrap().address, ["fe80::1/64"]);
        assert_eq!(
            client.runner.calls(),
            vec![vec!["-t", "device", "show", "wlan0"]]
        );
    }

    #[tokio::test]
    async fn scan_results_parse_escaped_ssids() {
        let client = client(FakeRunner::succeeding(
            "cafe\\:guest:Infra:6:130 Mbit/s:57:WPA2\n",
        ));
        let map = client.scan_results().await.unwrap();
        assert_eq!(map["cafe:guest"].signal, "57");
    }

    #[tokio::test]
    async fn connection_listing_is_scoped_by_type() {
        let stdout =
            "home:aaaa-1111:802-11-wireless:wlan0\noffice:bbbb-2222:802-3-ethernet:eth0\n";
        let wifi = client(FakeRunner::succeeding(stdout))
            .wifi_connections()
            .await
            .unwrap();
        assert_eq!(wifi.keys().collect::<Vec<_>>(), ["aaaa-1111"]);
        let ethernet = client(FakeRunner::succeeding(stdout))
            .ethernet_connections()
            .await
            .unwrap();
        assert_eq!(ethernet.keys().collect::<Vec<_>>(), ["bbbb-2222"]);
    }

    #[tokio::test]
    async fn empty_required_parameter_never_spawns() {
        let client = client(FakeRunner::succeeding(""));
        assert!(matches!(
            client.activate_connection("", None).await,
            Err(Error::InvalidParameter)
        ));
        assert!(matches!(
            client.interface_detail("").await,
            Err(Error::InvalidParameter)
        ));
        assert!(matches!(
            client.delete_connection("").await,
            Err(Error::InvalidParameter)
        ));
        assert!(matches!(
            client.disconnect("").await,
            Err(Error::InvalidParameter)
        ));
        assert!(matches!(
            client
                .create_wifi_connection(&ConnectRequest::default())
                .await,
            Err(Error::InvalidParameter)
        ));
        assert!(client.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn activate_appends_ifname_when_given() {
        let client = client(FakeRunner::succeeding(
            "Connection successfully activated\n",
        ));
        let msg = client
            .activate_connection("aaaa-1111", Some("wlan0"))
            .await
            .unwrap();
        assert_eq!(msg, "Connection successfully activated");
        assert_eq!(
            client.runner.calls(),
            vec![vec!["connection", "up", "aaaa-1111", "ifname", "wlan0"]]
        );
    }

    #[tokio::test]
    async fn create_builds_the_full_argument_vector() {
        let client = client(FakeRunner::succeeding("Device 'wlan0' successfully activated\n"));
        let req = ConnectRequest {
            ssid: "cafe".into(),
            password: Some("secret".into()),
            iface: Some("wlan0".into()),
            name: Some("cafe-profile".into()),
            timeout: Some(30),
        };
        client.create_wifi_connection(&req).await.unwrap();
        assert_eq!(
            client.runner.calls(),
            vec![vec![
                "--wait", "30", "device", "wifi", "connect", "cafe", "password", "secret",
                "ifname", "wlan0", "name", "cafe-profile",
            ]]
        );
    }

    #[tokio::test]
    async fn create_defaults_to_a_twenty_second_wait() {
        let client = client(FakeRunner::succeeding("ok\n"));
        let req = ConnectRequest {
            ssid: "cafe".into(),
            ..ConnectRequest::default()
        };
        client.create_wifi_connection(&req).await.unwrap();
        assert_eq!(
            client.runner.calls(),
            vec![vec!["--wait", "20", "device", "wifi", "connect", "cafe"]]
        );
    }

    #[tokio::test]
    async fn delete_and_disconnect_acknowledge_with_ok() {
        let client = client(FakeRunner::succeeding(""));
        assert_eq!(client.delete_connection("aaaa-1111").await.unwrap(), "ok");
        assert_eq!(client.disconnect("wlan0").await.unwrap(), "ok");
        assert_eq!(
            client.runner.calls(),
            vec![
                vec!["connection", "delete", "aaaa-1111"],
                vec!["device", "disconnect", "wlan0"],
            ]
        );
    }

    #[tokio::test]
    async fn malformed_listing_surfaces_field_count() {
        let client = client(FakeRunner::succeeding("wlan0:wifi\n"));
        let err = client.wifi_interfaces().await.unwrap_err();
        assert!(matches!(err, Error::FieldCount { expected: 3, got: 2 }));
    }
}
