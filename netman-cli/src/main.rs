//! Command-line front end: one subcommand per operation, JSON envelope on
//! stdout.

use anyhow::Result;
use netman_core::model::ConnectRequest;
use netman_core::{NetworkClient, envelope};
use serde_json::Value;

const USAGE: &str = "usage: netman <operation> [args]

operations:
  wifi-interfaces
  ethernet-interfaces
  detail <iface>
  scan
  wifi-connections
  ethernet-connections
  up <connection-id> [iface]
  connect <ssid> [password] [iface] [name]
  delete <connection-id>
  disconnect <iface>";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let client = NetworkClient::new();

    let value: Value = match args.as_slice() {
        ["wifi-interfaces"] => envelope::render(&client.wifi_interfaces().await),
        ["ethernet-interfaces"] => envelope::render(&client.ethernet_interfaces().await),
        ["detail", iface] => envelope::render(&client.interface_detail(iface).await),
        ["scan"] => envelope::render(&client.scan_results().await),
        ["wifi-connections"] => envelope::render(&client.wifi_connections().await),
        ["ethernet-connections"] => envelope::render(&client.ethernet_connections().await),
        ["up", id] => envelope::message(&client.activate_connection(id, None).await),
        ["up", id, iface] => envelope::message(&client.activate_connection(id, Some(iface)).await),
        ["connect", ssid, rest @ ..] if rest.len() <= 3 => {
            let req = ConnectRequest {
                ssid: ssid.to_string(),
                password: rest.first().map(|s| s.to_string()),
                iface: rest.get(1).map(|s| s.to_string()),
                name: rest.get(2).map(|s| s.to_string()),
                timeout: None,
            };
            envelope::message(&client.create_wifi_connection(&req).await)
        }
        ["delete", id] => envelope::message(&client.delete_connection(id).await),
        ["disconnect", iface] => envelope::message(&client.disconnect(iface).await),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
