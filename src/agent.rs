use async_channel::{Receiver, Sender};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::mpsc::UnboundedSender;
use zbus::zvariant::{ObjectPath, OwnedObjectPath};
use zbus::{fdo, interface};

use anyhow::Result;

use crate::event::Event;
use crate::iwd::IwdClient;

pub const AGENT_PATH: &str = "/io/iwtui/agent";

/// Coordination between the served D-Bus agent and the UI.
///
/// When iwd needs credentials it calls our agent, which raises the
/// passphrase popup through the event channel and then parks on the
/// async channel until the user submits or cancels.
#[derive(Debug, Clone)]
pub struct AuthAgent {
    pub tx_cancel: Sender<()>,
    pub rx_cancel: Receiver<()>,
    pub tx_passphrase: Sender<String>,
    pub rx_passphrase: Receiver<String>,
    pub psk_required: Arc<AtomicBool>,
    pub event_sender: UnboundedSender<Event>,
}

impl AuthAgent {
    pub fn new(sender: UnboundedSender<Event>) -> Self {
        let (tx_passphrase, rx_passphrase) = async_channel::unbounded();
        let (tx_cancel, rx_cancel) = async_channel::unbounded();

        Self {
            tx_cancel,
            rx_cancel,
            tx_passphrase,
            rx_passphrase,
            psk_required: Arc::new(AtomicBool::new(false)),
            event_sender: sender,
        }
    }

    /// Raise the passphrase popup for the named network
    pub fn request_passphrase(&self, network_name: String) -> Result<()> {
        self.psk_required.store(true, Ordering::Relaxed);

        self.event_sender
            .send(Event::Auth(network_name))
            .map_err(|e| anyhow::anyhow!("Failed to send auth event: {}", e))?;

        Ok(())
    }

    /// Block until the user answers the popup, or None on cancel
    pub async fn wait_for_passphrase(&self) -> Option<String> {
        tokio::select! {
            r = self.rx_passphrase.recv() => {
                r.ok()
            }
            _ = self.rx_cancel.recv() => {
                None
            }
        }
    }

    pub async fn send_passphrase(&self, passphrase: String) {
        let _ = self.tx_passphrase.send(passphrase).await;
    }

    pub async fn cancel(&self) {
        let _ = self.tx_cancel.send(()).await;
    }

    pub fn reset(&self) {
        self.psk_required.store(false, Ordering::Relaxed);
    }
}

/// The net.connman.iwd.Agent object served on our connection
pub struct IwdAgent {
    client: Arc<IwdClient>,
    auth: AuthAgent,
}

#[interface(name = "net.connman.iwd.Agent")]
impl IwdAgent {
    async fn request_passphrase(&self, network: OwnedObjectPath) -> fdo::Result<String> {
        let name = self
            .client
            .get_network_name(network.as_str())
            .await
            .unwrap_or_else(|_| network.to_string());

        self.auth
            .request_passphrase(name)
            .map_err(|e| fdo::Error::Failed(e.to_string()))?;

        match self.auth.wait_for_passphrase().await {
            Some(passphrase) => {
                self.auth.reset();
                Ok(passphrase)
            }
            None => {
                self.auth.reset();
                Err(fdo::Error::Failed("Canceled".to_string()))
            }
        }
    }

    // Enterprise credential collection is not supported; refusing the
    // request makes iwd abort the connection attempt cleanly.
    async fn request_private_key_passphrase(&self, _network: OwnedObjectPath) -> fdo::Result<String> {
        Err(fdo::Error::Failed("Canceled".to_string()))
    }

    async fn request_user_name_and_password(
        &self,
        _network: OwnedObjectPath,
    ) -> fdo::Result<(String, String)> {
        Err(fdo::Error::Failed("Canceled".to_string()))
    }

    async fn request_user_password(
        &self,
        _network: OwnedObjectPath,
        _user: String,
    ) -> fdo::Result<String> {
        Err(fdo::Error::Failed("Canceled".to_string()))
    }

    /// iwd gave up on the pending request; close the popup
    async fn cancel(&self, reason: String) {
        log::info!("Agent request canceled by the daemon: {reason}");
        self.auth.reset();
        self.auth.cancel().await;
        let _ = self.auth.event_sender.send(Event::AuthCancel);
    }

    fn release(&self) {
        log::info!("Agent released by the daemon");
    }
}

/// Serve the agent object and register it with the daemon's
/// AgentManager. iwd will route credential requests to it for as long
/// as our connection lives.
pub async fn register(client: Arc<IwdClient>, auth: AuthAgent) -> Result<()> {
    let agent = IwdAgent {
        client: client.clone(),
        auth,
    };

    client
        .connection()
        .object_server()
        .at(AGENT_PATH, agent)
        .await?;

    client.register_agent(ObjectPath::try_from(AGENT_PATH)?).await?;

    Ok(())
}
