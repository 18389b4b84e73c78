use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use tokio::sync::mpsc::UnboundedSender;

use crate::iwd::{IwdClient, KnownNetworkInfo, SecurityType};

use crate::{
    event::Event,
    notification::{Notification, NotificationLevel},
};

/// A provisioned network iwd remembers across restarts
#[derive(Debug, Clone)]
pub struct KnownNetwork {
    pub client: Arc<IwdClient>,
    pub path: String,
    pub name: String,
    pub security: SecurityType,
    pub is_autoconnect: bool,
    pub is_hidden: bool,
    pub last_connected: Option<DateTime<FixedOffset>>,
}

impl KnownNetwork {
    pub fn from_info(client: Arc<IwdClient>, info: KnownNetworkInfo) -> Self {
        Self {
            client,
            path: info.path,
            name: info.name,
            security: info.security,
            is_autoconnect: info.is_autoconnect,
            is_hidden: info.is_hidden,
            last_connected: info.last_connected,
        }
    }

    /// Drop the provisioning. Dispatched fire-and-forget by the
    /// handler, so this only performs the call.
    pub async fn forget(&self) -> Result<()> {
        self.client.forget_known_network(&self.path).await
    }

    pub async fn toggle_autoconnect(&mut self, sender: UnboundedSender<Event>) -> Result<()> {
        let new_autoconnect = !self.is_autoconnect;

        match self
            .client
            .set_known_network_autoconnect(&self.path, new_autoconnect)
            .await
        {
            Ok(()) => {
                self.is_autoconnect = new_autoconnect;
                let msg = if new_autoconnect {
                    format!("Enable Autoconnect for: {}", self.name)
                } else {
                    format!("Disable Autoconnect for: {}", self.name)
                };
                Notification::send(msg, NotificationLevel::Info, &sender)?;
            }
            Err(e) => {
                log::warn!("AutoConnect update failed: {e:#}");
                Notification::send(
                    "Failed to update autoconnect".to_string(),
                    NotificationLevel::Error,
                    &sender,
                )?;
            }
        }
        Ok(())
    }
}
