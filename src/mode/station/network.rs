use std::sync::Arc;

use anyhow::Result;

use crate::iwd::{IwdClient, NetworkInfo, SecurityType};
use crate::mode::station::known_network::KnownNetwork;

/// A network currently visible in scan results
#[derive(Debug, Clone)]
pub struct Network {
    pub client: Arc<IwdClient>,
    pub path: String,
    pub name: String,
    pub security: SecurityType,
    pub is_connected: bool,
    pub known_network: Option<KnownNetwork>,
}

impl Network {
    pub fn from_info(
        client: Arc<IwdClient>,
        info: NetworkInfo,
        known_network: Option<KnownNetwork>,
    ) -> Self {
        Self {
            client,
            path: info.path,
            name: info.name,
            security: info.security,
            is_connected: info.connected,
            known_network,
        }
    }

    /// One Connect call on the network object. iwd collects any
    /// required credentials through the registered agent, so there is
    /// no password argument here.
    pub async fn connect(&self) -> Result<()> {
        self.client.connect_network(&self.path).await
    }

    pub fn is_enterprise(&self) -> bool {
        self.security.is_enterprise()
    }
}
