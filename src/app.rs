use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::iwd::{IwdClient, Mode};

use crate::{
    adapter::Adapter, agent, agent::AuthAgent, config::Config, device::Device, event::Event,
    mode::station::auth::Auth, notification::Notification, reset::Reset,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusedBlock {
    Device,
    AccessPoint,
    KnownNetworks,
    NewNetworks,
    PskAuthKey,
    HiddenSsidInput,
    AdapterInfos,
    AccessPointInput,
    AccessPointConnectedDevices,
    ShareNetwork,
}

pub struct App {
    pub running: bool,
    pub focused_block: FocusedBlock,
    pub notifications: Vec<Notification>,
    pub client: Arc<IwdClient>,
    pub adapter: Adapter,
    pub device: Device,
    pub agent: AuthAgent,
    pub reset: Reset,
    pub config: Arc<Config>,
    pub auth: Auth,
}

impl App {
    pub async fn new(
        sender: UnboundedSender<Event>,
        config: Arc<Config>,
        mode: Option<Mode>,
    ) -> Result<Self> {
        let client = Arc::new(IwdClient::new().await?);

        let mut device = Device::new(client.clone()).await?;

        let adapter = Adapter::new(client.clone(), device.device_path.clone(), config.clone())
            .await
            .context("Cannot read the adapter backing the wireless device")?;

        // An explicit --mode wins over whatever the device is in
        if let Some(mode) = mode
            && mode != device.mode
        {
            device.set_mode(mode).await?;
        }

        let agent = AuthAgent::new(sender);
        agent::register(client.clone(), agent.clone())
            .await
            .context("Failed to register the credential agent with iwd")?;

        let focused_block = if device.is_powered {
            match device.mode {
                Mode::Station => FocusedBlock::KnownNetworks,
                Mode::Ap => FocusedBlock::AccessPoint,
            }
        } else {
            FocusedBlock::Device
        };

        let reset = Reset {
            enable: false,
            selected_mode: device.mode,
        };

        Ok(Self {
            running: true,
            focused_block,
            notifications: Vec::new(),
            client,
            adapter,
            agent,
            reset,
            device,
            config,
            auth: Auth::default(),
        })
    }

    /// Switch the device mode and refocus accordingly
    pub async fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.device.set_mode(mode).await?;
        self.focused_block = if self.device.is_powered {
            match mode {
                Mode::Station => FocusedBlock::KnownNetworks,
                Mode::Ap => FocusedBlock::AccessPoint,
            }
        } else {
            FocusedBlock::Device
        };
        Ok(())
    }

    pub async fn tick(&mut self) -> Result<()> {
        self.notifications.retain(|n| n.ttl > 0);
        self.notifications.iter_mut().for_each(|n| n.ttl -= 1);

        self.device.refresh().await?;
        self.adapter.refresh().await?;

        Ok(())
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
