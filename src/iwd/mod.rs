// iwd D-Bus abstraction layer
//
// All daemon access goes through IwdClient; the rest of the app never
// touches zbus directly. iwd publishes its object tree through the
// standard ObjectManager at "/".

use anyhow::{Context, Result};
use std::collections::HashMap;
use zbus::zvariant::{ObjectPath, OwnedObjectPath, OwnedValue};
use zbus::{Connection, Proxy};

pub mod station;
pub mod types;

pub use types::*;

const IWD_BUS_NAME: &str = "net.connman.iwd";
const IWD_ROOT_PATH: &str = "/";
const IWD_AGENT_MANAGER_PATH: &str = "/net/connman/iwd";

const DEVICE_IFACE: &str = "net.connman.iwd.Device";
const ADAPTER_IFACE: &str = "net.connman.iwd.Adapter";
const STATION_IFACE: &str = "net.connman.iwd.Station";
const STATION_DIAGNOSTIC_IFACE: &str = "net.connman.iwd.StationDiagnostic";
const NETWORK_IFACE: &str = "net.connman.iwd.Network";
const KNOWN_NETWORK_IFACE: &str = "net.connman.iwd.KnownNetwork";
const ACCESS_POINT_IFACE: &str = "net.connman.iwd.AccessPoint";
const ACCESS_POINT_DIAGNOSTIC_IFACE: &str = "net.connman.iwd.AccessPointDiagnostic";
const AGENT_MANAGER_IFACE: &str = "net.connman.iwd.AgentManager";

pub type InterfaceProps = HashMap<String, HashMap<String, OwnedValue>>;
pub type ManagedObjects = HashMap<OwnedObjectPath, InterfaceProps>;

/// Main iwd client
#[derive(Clone, Debug)]
pub struct IwdClient {
    connection: Connection,
}

impl IwdClient {
    pub async fn new() -> Result<Self> {
        let connection = Connection::system()
            .await
            .context("Failed to connect to system D-Bus")?;

        let client = Self { connection };

        // A successful GetManagedObjects both verifies the daemon is
        // reachable and warms up the name resolution.
        client.get_managed_objects().await.context(
            "iwd is not running or not accessible. Please ensure the iwd service is active.",
        )?;

        Ok(client)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    async fn proxy(&self, path: &str, interface: &'static str) -> Result<Proxy<'_>> {
        Ok(Proxy::new(&self.connection, IWD_BUS_NAME, path.to_owned(), interface).await?)
    }

    pub async fn get_managed_objects(&self) -> Result<ManagedObjects> {
        let proxy = self
            .proxy(IWD_ROOT_PATH, "org.freedesktop.DBus.ObjectManager")
            .await?;
        Ok(proxy.call("GetManagedObjects", &()).await?)
    }

    //
    // Device
    //

    /// All wireless devices known to iwd
    pub async fn get_devices(&self) -> Result<Vec<OwnedObjectPath>> {
        let objects = self.get_managed_objects().await?;
        let mut devices: Vec<OwnedObjectPath> = objects
            .into_iter()
            .filter(|(_, interfaces)| interfaces.contains_key(DEVICE_IFACE))
            .map(|(path, _)| path)
            .collect();
        devices.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(devices)
    }

    /// The first wireless device
    pub async fn get_device(&self) -> Result<OwnedObjectPath> {
        self.get_devices()
            .await?
            .into_iter()
            .next()
            .context("No wireless device found")
    }

    pub async fn get_device_name(&self, device_path: &str) -> Result<String> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        Ok(proxy.get_property("Name").await?)
    }

    pub async fn get_device_address(&self, device_path: &str) -> Result<String> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        Ok(proxy.get_property("Address").await?)
    }

    pub async fn is_device_powered(&self, device_path: &str) -> Result<bool> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        Ok(proxy.get_property("Powered").await?)
    }

    pub async fn set_device_powered(&self, device_path: &str, powered: bool) -> Result<()> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        proxy.set_property("Powered", powered).await?;
        Ok(())
    }

    pub async fn get_device_mode(&self, device_path: &str) -> Result<Mode> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        let mode: String = proxy.get_property("Mode").await?;
        Mode::try_from(mode.as_str())
    }

    /// Switching the mode tears down the Station or AccessPoint
    /// interface and brings up the other one.
    pub async fn set_device_mode(&self, device_path: &str, mode: Mode) -> Result<()> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        proxy.set_property("Mode", mode.to_string()).await?;
        Ok(())
    }

    pub async fn get_device_adapter(&self, device_path: &str) -> Result<OwnedObjectPath> {
        let proxy = self.proxy(device_path, DEVICE_IFACE).await?;
        Ok(proxy.get_property("Adapter").await?)
    }

    //
    // Adapter
    //

    pub async fn get_adapter_model(&self, adapter_path: &str) -> Result<Option<String>> {
        let proxy = self.proxy(adapter_path, ADAPTER_IFACE).await?;
        Ok(proxy.get_property("Model").await.ok())
    }

    pub async fn get_adapter_vendor(&self, adapter_path: &str) -> Result<Option<String>> {
        let proxy = self.proxy(adapter_path, ADAPTER_IFACE).await?;
        Ok(proxy.get_property("Vendor").await.ok())
    }

    pub async fn get_adapter_supported_modes(&self, adapter_path: &str) -> Result<Vec<String>> {
        let proxy = self.proxy(adapter_path, ADAPTER_IFACE).await?;
        Ok(proxy.get_property("SupportedModes").await?)
    }

    pub async fn is_adapter_powered(&self, adapter_path: &str) -> Result<bool> {
        let proxy = self.proxy(adapter_path, ADAPTER_IFACE).await?;
        Ok(proxy.get_property("Powered").await?)
    }

    pub async fn set_adapter_powered(&self, adapter_path: &str, powered: bool) -> Result<()> {
        let proxy = self.proxy(adapter_path, ADAPTER_IFACE).await?;
        proxy.set_property("Powered", powered).await?;
        Ok(())
    }

    //
    // Station
    //

    pub async fn get_station_state(&self, device_path: &str) -> Result<StationState> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        let state: String = proxy.get_property("State").await?;
        Ok(StationState::from(state.as_str()))
    }

    pub async fn is_station_scanning(&self, device_path: &str) -> Result<bool> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        Ok(proxy.get_property("Scanning").await?)
    }

    /// The ConnectedNetwork property is absent while disconnected
    pub async fn get_connected_network(&self, device_path: &str) -> Result<Option<OwnedObjectPath>> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        Ok(proxy.get_property("ConnectedNetwork").await.ok())
    }

    pub async fn request_scan(&self, device_path: &str) -> Result<()> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        let _: () = proxy.call("Scan", &()).await?;
        Ok(())
    }

    pub async fn disconnect_station(&self, device_path: &str) -> Result<()> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        let _: () = proxy.call("Disconnect", &()).await?;
        Ok(())
    }

    /// Attempt a connection to a hidden network carrying the SSID as
    /// the only argument. Credentials, if needed, arrive through the
    /// registered agent.
    pub async fn connect_hidden_network(&self, device_path: &str, ssid: &str) -> Result<()> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        let _: () = proxy.call("ConnectHiddenNetwork", &(ssid,)).await?;
        Ok(())
    }

    /// Visible networks with their signal strength in 1/100 dBm,
    /// strongest first
    pub async fn get_ordered_networks(&self, device_path: &str) -> Result<Vec<(OwnedObjectPath, i16)>> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        Ok(proxy.call("GetOrderedNetworks", &()).await?)
    }

    /// Access points that do not broadcast an SSID: (address, signal, type)
    pub async fn get_hidden_access_points(&self, device_path: &str) -> Result<Vec<HiddenAccessPoint>> {
        let proxy = self.proxy(device_path, STATION_IFACE).await?;
        let aps: Vec<(String, i16, String)> = proxy.call("GetHiddenAccessPoints", &()).await?;
        Ok(aps
            .into_iter()
            .map(|(address, signal_strength, security)| HiddenAccessPoint {
                address,
                signal_strength,
                security: SecurityType::from(security.as_str()),
            })
            .collect())
    }

    pub async fn get_station_diagnostics(&self, device_path: &str) -> Result<DiagnosticInfo> {
        let proxy = self.proxy(device_path, STATION_DIAGNOSTIC_IFACE).await?;
        let diagnostics: HashMap<String, OwnedValue> = proxy.call("GetDiagnostics", &()).await?;

        Ok(DiagnosticInfo {
            frequency: prop_as(&diagnostics, "Frequency"),
            rssi: prop_as(&diagnostics, "RSSI"),
            rx_bitrate: prop_as(&diagnostics, "RxBitrate"),
            tx_bitrate: prop_as(&diagnostics, "TxBitrate"),
            security: prop_as(&diagnostics, "Security"),
        })
    }

    //
    // Network
    //

    pub async fn get_network_name(&self, network_path: &str) -> Result<String> {
        let proxy = self.proxy(network_path, NETWORK_IFACE).await?;
        Ok(proxy.get_property("Name").await?)
    }

    pub async fn get_network_security(&self, network_path: &str) -> Result<SecurityType> {
        let proxy = self.proxy(network_path, NETWORK_IFACE).await?;
        let network_type: String = proxy.get_property("Type").await?;
        Ok(SecurityType::from(network_type.as_str()))
    }

    pub async fn is_network_connected(&self, network_path: &str) -> Result<bool> {
        let proxy = self.proxy(network_path, NETWORK_IFACE).await?;
        Ok(proxy.get_property("Connected").await?)
    }

    /// The KnownNetwork property is absent for unprovisioned networks
    pub async fn get_network_known_network(
        &self,
        network_path: &str,
    ) -> Result<Option<OwnedObjectPath>> {
        let proxy = self.proxy(network_path, NETWORK_IFACE).await?;
        Ok(proxy.get_property("KnownNetwork").await.ok())
    }

    pub async fn connect_network(&self, network_path: &str) -> Result<()> {
        let proxy = self.proxy(network_path, NETWORK_IFACE).await?;
        let _: () = proxy.call("Connect", &()).await?;
        Ok(())
    }

    //
    // Known networks
    //

    /// All provisioned networks, most recently connected first
    pub async fn get_known_networks(&self) -> Result<Vec<KnownNetworkInfo>> {
        let objects = self.get_managed_objects().await?;
        let mut known: Vec<KnownNetworkInfo> = objects
            .into_iter()
            .filter_map(|(path, mut interfaces)| {
                let props = interfaces.remove(KNOWN_NETWORK_IFACE)?;
                Some(KnownNetworkInfo {
                    path: path.to_string(),
                    name: prop_as(&props, "Name").unwrap_or_default(),
                    security: SecurityType::from(
                        prop_as::<String>(&props, "Type").unwrap_or_default().as_str(),
                    ),
                    is_hidden: prop_as(&props, "Hidden").unwrap_or(false),
                    is_autoconnect: prop_as(&props, "AutoConnect").unwrap_or(true),
                    last_connected: prop_as::<String>(&props, "LastConnectedTime")
                        .and_then(|v| parse_last_connected(&v)),
                })
            })
            .collect();

        known.sort_by(|a, b| b.last_connected.cmp(&a.last_connected));
        Ok(known)
    }

    pub async fn forget_known_network(&self, known_network_path: &str) -> Result<()> {
        let proxy = self.proxy(known_network_path, KNOWN_NETWORK_IFACE).await?;
        let _: () = proxy.call("Forget", &()).await?;
        Ok(())
    }

    pub async fn set_known_network_autoconnect(
        &self,
        known_network_path: &str,
        autoconnect: bool,
    ) -> Result<()> {
        let proxy = self.proxy(known_network_path, KNOWN_NETWORK_IFACE).await?;
        proxy.set_property("AutoConnect", autoconnect).await?;
        Ok(())
    }

    //
    // Access point mode
    //

    pub async fn start_access_point(&self, device_path: &str, ssid: &str, psk: &str) -> Result<()> {
        let proxy = self.proxy(device_path, ACCESS_POINT_IFACE).await?;
        let _: () = proxy.call("Start", &(ssid, psk)).await?;
        Ok(())
    }

    pub async fn stop_access_point(&self, device_path: &str) -> Result<()> {
        let proxy = self.proxy(device_path, ACCESS_POINT_IFACE).await?;
        let _: () = proxy.call("Stop", &()).await?;
        Ok(())
    }

    pub async fn is_access_point_started(&self, device_path: &str) -> Result<bool> {
        let proxy = self.proxy(device_path, ACCESS_POINT_IFACE).await?;
        Ok(proxy.get_property("Started").await?)
    }

    pub async fn get_access_point_name(&self, device_path: &str) -> Result<Option<String>> {
        let proxy = self.proxy(device_path, ACCESS_POINT_IFACE).await?;
        Ok(proxy.get_property("Name").await.ok())
    }

    /// MAC addresses of the clients associated to our AP
    pub async fn get_access_point_clients(&self, device_path: &str) -> Result<Vec<String>> {
        let proxy = self.proxy(device_path, ACCESS_POINT_DIAGNOSTIC_IFACE).await?;
        let clients: Vec<HashMap<String, OwnedValue>> = proxy.call("GetDiagnostics", &()).await?;
        Ok(clients
            .iter()
            .filter_map(|props| prop_as(props, "Address"))
            .collect())
    }

    //
    // Agent
    //

    pub async fn register_agent(&self, agent_path: ObjectPath<'_>) -> Result<()> {
        let proxy = self
            .proxy(IWD_AGENT_MANAGER_PATH, AGENT_MANAGER_IFACE)
            .await?;
        let _: () = proxy.call("RegisterAgent", &(agent_path,)).await?;
        Ok(())
    }

    pub async fn unregister_agent(&self, agent_path: ObjectPath<'_>) -> Result<()> {
        let proxy = self
            .proxy(IWD_AGENT_MANAGER_PATH, AGENT_MANAGER_IFACE)
            .await?;
        let _: () = proxy.call("UnregisterAgent", &(agent_path,)).await?;
        Ok(())
    }
}

/// Pull a typed value out of an a{sv} property map
fn prop_as<T>(props: &HashMap<String, OwnedValue>, key: &str) -> Option<T>
where
    T: TryFrom<OwnedValue>,
{
    props
        .get(key)
        .and_then(|v| v.try_clone().ok())
        .and_then(|v| T::try_from(v).ok())
}
