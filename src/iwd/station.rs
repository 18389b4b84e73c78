// Station-level helpers on top of the raw iwd calls

use super::{IwdClient, NetworkInfo};
use anyhow::Result;

impl IwdClient {
    /// Resolve the ordered network list into full network info,
    /// keeping iwd's strongest-first ordering.
    pub async fn get_visible_networks(
        &self,
        device_path: &str,
    ) -> Result<Vec<(NetworkInfo, i16)>> {
        let ordered = self.get_ordered_networks(device_path).await?;
        let mut networks = Vec::with_capacity(ordered.len());

        for (network_path, signal_strength) in ordered {
            // A network can vanish between the listing and the
            // property reads; skip it rather than failing the refresh.
            if let Ok(info) = self.resolve_network(network_path.as_str()).await {
                networks.push((info, signal_strength));
            }
        }

        Ok(networks)
    }

    async fn resolve_network(&self, network_path: &str) -> Result<NetworkInfo> {
        let name = self.get_network_name(network_path).await?;
        let security = self.get_network_security(network_path).await?;
        let connected = self.is_network_connected(network_path).await?;
        let known_network_path = self
            .get_network_known_network(network_path)
            .await?
            .map(|p| p.to_string());

        Ok(NetworkInfo {
            path: network_path.to_string(),
            name,
            security,
            connected,
            known_network_path,
        })
    }

    /// Name of the currently connected network, if any
    pub async fn get_connected_network_name(&self, device_path: &str) -> Result<Option<String>> {
        match self.get_connected_network(device_path).await? {
            Some(network_path) => Ok(Some(self.get_network_name(network_path.as_str()).await?)),
            None => Ok(None),
        }
    }
}
