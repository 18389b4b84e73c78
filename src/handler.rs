use anyhow::Result;
use std::sync::Arc;

use crate::app::{App, FocusedBlock};
use crate::call::{self, CallKind};
use crate::config::Config;
use crate::device::Device;
use crate::event::Event;
use crate::iwd::{Mode, SecurityType};
use crate::mode::ap::APFocusedSection;
use crate::mode::station::KnownNetworkSelection;
use crate::mode::station::share::Share;
use crate::notification::{Notification, NotificationLevel};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::backend::crossterm::EventHandler;

pub async fn toggle_connect(app: &mut App, sender: UnboundedSender<Event>) -> Result<()> {
    let Some(station) = &mut app.device.station else {
        return Ok(());
    };

    match app.focused_block {
        FocusedBlock::NewNetworks => {
            if let Some(net_index) = station.new_networks_state.selected() {
                if net_index < station.new_networks.len() {
                    let (net, _) = station.new_networks[net_index].clone();

                    // Credentials, if any, are collected by the agent
                    // while the call runs
                    call::dispatch(CallKind::Connect, sender, async move {
                        net.connect().await
                    });
                } else {
                    // A hidden access point row: iwd cannot connect by
                    // address, so ask for the SSID.
                    app.focused_block = FocusedBlock::HiddenSsidInput;
                }
            }
        }
        FocusedBlock::KnownNetworks => {
            if let Some(KnownNetworkSelection::Network(index)) = station.resolve_known_selection() {
                let (net, _) = station.known_networks[index].clone();

                if net.is_connected {
                    let client = station.client.clone();
                    let device_path = station.device_path.clone();
                    call::dispatch(CallKind::Disconnect, sender, async move {
                        client.disconnect_station(&device_path).await
                    });
                } else {
                    call::dispatch(CallKind::Connect, sender, async move {
                        net.connect().await
                    });
                }
            }
            // Out-of-range networks cannot be connected to
        }
        _ => {}
    }

    Ok(())
}

async fn toggle_device_power(sender: UnboundedSender<Event>, device: &Device) -> Result<()> {
    if device.is_powered {
        match device.power_off().await {
            Ok(()) => {
                Notification::send(
                    "Device Powered Off".to_string(),
                    NotificationLevel::Info,
                    &sender,
                )?;
            }
            Err(e) => {
                Notification::send(e.to_string(), NotificationLevel::Error, &sender)?;
            }
        }
    } else {
        match device.power_on().await {
            Ok(()) => {
                Notification::send(
                    "Device Powered On".to_string(),
                    NotificationLevel::Info,
                    &sender,
                )?;
            }
            Err(e) => {
                Notification::send(e.to_string(), NotificationLevel::Error, &sender)?;
            }
        }
    }
    Ok(())
}

pub async fn handle_key_events(
    key_event: KeyEvent,
    app: &mut App,
    sender: UnboundedSender<Event>,
    config: Arc<Config>,
) -> Result<()> {
    if app.reset.enable {
        match key_event.code {
            KeyCode::Char('q') => {
                app.quit();
            }
            KeyCode::Char('c' | 'C') => {
                if key_event.modifiers == KeyModifiers::CONTROL {
                    app.quit();
                }
            }

            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('k') | KeyCode::Up => {
                app.reset.toggle_selection();
            }

            KeyCode::Enter => {
                app.reset.enable = false;
                sender.send(Event::Reset(app.reset.selected_mode))?;
            }

            KeyCode::Esc => {
                app.reset.enable = false;
                app.reset.selected_mode = app.device.mode;
            }

            _ => {}
        }
        return Ok(());
    }

    if !app.device.is_powered {
        match app.focused_block {
            FocusedBlock::AdapterInfos => {
                if key_event.code == KeyCode::Esc {
                    app.focused_block = FocusedBlock::Device;
                }
            }

            FocusedBlock::Device => match key_event.code {
                KeyCode::Char('q') => {
                    app.quit();
                }
                KeyCode::Esc if app.config.esc_quit => {
                    app.quit();
                }

                KeyCode::Char('c' | 'C') => {
                    if key_event.modifiers == KeyModifiers::CONTROL {
                        app.quit();
                    }
                }

                KeyCode::Char(c) if c == config.device.infos => {
                    app.focused_block = FocusedBlock::AdapterInfos;
                }
                KeyCode::Char(c) if c == config.device.toggle_power => {
                    toggle_device_power(sender, &app.device).await?;
                }
                _ => {}
            },
            _ => {}
        }

        return Ok(());
    }

    match app.device.mode {
        Mode::Station => {
            if let Some(station) = &mut app.device.station {
                match app.focused_block {
                    FocusedBlock::HiddenSsidInput => match key_event.code {
                        KeyCode::Enter => {
                            // An empty SSID is a silent no-op; the
                            // popup stays open until valid input or Esc
                            if let Some(ssid) = app.auth.hidden.submit() {
                                let client = station.client.clone();
                                let device_path = station.device_path.clone();
                                app.focused_block = FocusedBlock::NewNetworks;
                                call::dispatch(CallKind::ConnectHidden, sender, async move {
                                    client.connect_hidden_network(&device_path, &ssid).await
                                });
                            }
                        }

                        KeyCode::Esc => {
                            app.auth.hidden.reset();
                            app.focused_block = FocusedBlock::NewNetworks;
                        }

                        _ => {
                            app.auth
                                .hidden
                                .ssid
                                .handle_event(&crossterm::event::Event::Key(key_event));
                        }
                    },

                    FocusedBlock::PskAuthKey => match key_event.code {
                        KeyCode::Enter => {
                            if let Some(passphrase) = app.auth.psk.submit() {
                                app.agent.send_passphrase(passphrase).await;
                                app.focused_block = FocusedBlock::NewNetworks;
                            }
                        }

                        KeyCode::Esc => {
                            app.auth.psk.reset();
                            app.agent.cancel().await;
                            app.focused_block = FocusedBlock::NewNetworks;
                        }

                        KeyCode::Tab => {
                            app.auth.psk.show_password = !app.auth.psk.show_password;
                        }

                        _ => {
                            app.auth
                                .psk
                                .passphrase
                                .handle_event(&crossterm::event::Event::Key(key_event));
                        }
                    },

                    FocusedBlock::AdapterInfos => {
                        if key_event.code == KeyCode::Esc {
                            app.focused_block = FocusedBlock::Device;
                        }
                    }
                    FocusedBlock::ShareNetwork => {
                        if key_event.code == KeyCode::Esc {
                            station.share = None;
                            app.focused_block = FocusedBlock::KnownNetworks;
                        }
                    }
                    _ => {
                        match key_event.code {
                            KeyCode::Char('q') => {
                                app.quit();
                            }
                            KeyCode::Esc if app.config.esc_quit => {
                                app.quit();
                            }

                            KeyCode::Char('c' | 'C') => {
                                if key_event.modifiers == KeyModifiers::CONTROL {
                                    app.quit();
                                }
                            }

                            // Switch mode
                            KeyCode::Char(c)
                                if c == config.switch
                                    && key_event.modifiers == KeyModifiers::CONTROL =>
                            {
                                app.reset.enable = true;
                            }

                            KeyCode::Tab => match app.focused_block {
                                FocusedBlock::Device => {
                                    app.focused_block = FocusedBlock::KnownNetworks;
                                }
                                FocusedBlock::KnownNetworks => {
                                    app.focused_block = FocusedBlock::NewNetworks;
                                }
                                FocusedBlock::NewNetworks => {
                                    app.focused_block = FocusedBlock::Device;
                                }
                                _ => {}
                            },
                            KeyCode::BackTab => match app.focused_block {
                                FocusedBlock::Device => {
                                    app.focused_block = FocusedBlock::NewNetworks;
                                }
                                FocusedBlock::NewNetworks => {
                                    app.focused_block = FocusedBlock::KnownNetworks;
                                }
                                FocusedBlock::KnownNetworks => {
                                    app.focused_block = FocusedBlock::Device;
                                }
                                _ => {}
                            },

                            KeyCode::Char(c) if c == config.station.start_scanning => {
                                station.scan(sender).await?;
                            }
                            _ => match app.focused_block {
                                FocusedBlock::Device => match key_event.code {
                                    KeyCode::Char(c) if c == config.device.infos => {
                                        app.focused_block = FocusedBlock::AdapterInfos;
                                    }
                                    KeyCode::Char(c) if c == config.device.toggle_power => {
                                        toggle_device_power(sender, &app.device).await?;
                                    }
                                    _ => {}
                                },

                                FocusedBlock::KnownNetworks => {
                                    match key_event.code {
                                        // Share the stored passphrase as a QR code
                                        KeyCode::Char(c)
                                            if c == config.station.known_network.share =>
                                        {
                                            let name = match station.resolve_known_selection() {
                                                Some(KnownNetworkSelection::Network(i)) => {
                                                    let (net, _) = &station.known_networks[i];
                                                    (net.security == SecurityType::Psk)
                                                        .then(|| net.name.clone())
                                                }
                                                Some(KnownNetworkSelection::Unavailable(i)) => {
                                                    let net =
                                                        &station.unavailable_known_networks[i];
                                                    (net.security == SecurityType::Psk)
                                                        .then(|| net.name.clone())
                                                }
                                                None => None,
                                            };

                                            if let Some(name) = name {
                                                match Share::new(name) {
                                                    Ok(share) => {
                                                        station.share = Some(share);
                                                        app.focused_block =
                                                            FocusedBlock::ShareNetwork;
                                                    }
                                                    Err(e) => {
                                                        Notification::send(
                                                            e.to_string(),
                                                            NotificationLevel::Error,
                                                            &sender,
                                                        )?;
                                                    }
                                                }
                                            }
                                        }
                                        // Remove a known network
                                        KeyCode::Char(c)
                                            if c == config.station.known_network.remove =>
                                        {
                                            let known = match station.resolve_known_selection() {
                                                Some(KnownNetworkSelection::Network(i)) => station
                                                    .known_networks[i]
                                                    .0
                                                    .known_network
                                                    .clone(),
                                                Some(KnownNetworkSelection::Unavailable(i)) => {
                                                    Some(
                                                        station.unavailable_known_networks[i]
                                                            .clone(),
                                                    )
                                                }
                                                None => None,
                                            };

                                            if let Some(known) = known {
                                                call::dispatch(
                                                    CallKind::Forget,
                                                    sender,
                                                    async move { known.forget().await },
                                                );
                                            }
                                        }

                                        // Toggle autoconnect
                                        KeyCode::Char(c)
                                            if c == config
                                                .station
                                                .known_network
                                                .toggle_autoconnect =>
                                        {
                                            if let Some(KnownNetworkSelection::Network(i)) =
                                                station.resolve_known_selection()
                                            {
                                                let (net, _) = &mut station.known_networks[i];
                                                if let Some(known) = &mut net.known_network {
                                                    known
                                                        .toggle_autoconnect(sender.clone())
                                                        .await?;
                                                }
                                            }
                                        }

                                        // Show / Hide out-of-range networks
                                        KeyCode::Char(c)
                                            if c == config.station.known_network.show_all =>
                                        {
                                            station.show_unavailable_known_networks =
                                                !station.show_unavailable_known_networks;
                                        }

                                        // Connect/Disconnect
                                        KeyCode::Enter | KeyCode::Char(' ') => {
                                            toggle_connect(app, sender).await?
                                        }

                                        // Scroll down
                                        KeyCode::Char('j') | KeyCode::Down => {
                                            let total = station.known_networks_total_rows();
                                            if total > 0 {
                                                let i =
                                                    match station.known_networks_state.selected() {
                                                        Some(i) => {
                                                            if i < total - 1 { i + 1 } else { i }
                                                        }
                                                        None => 0,
                                                    };
                                                station.known_networks_state.select(Some(i));
                                            }
                                        }
                                        KeyCode::Char('k') | KeyCode::Up => {
                                            if station.known_networks_total_rows() > 0 {
                                                let i =
                                                    match station.known_networks_state.selected() {
                                                        Some(i) => i.saturating_sub(1),
                                                        None => 0,
                                                    };
                                                station.known_networks_state.select(Some(i));
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                FocusedBlock::NewNetworks => match key_event.code {
                                    // Show / Hide access points with no
                                    // broadcast SSID
                                    KeyCode::Char(c)
                                        if c == config.station.new_network.show_all =>
                                    {
                                        station.show_hidden_networks =
                                            !station.show_hidden_networks;
                                    }
                                    // Connect to a hidden network
                                    KeyCode::Char(c)
                                        if c == config.station.new_network.connect_hidden =>
                                    {
                                        app.focused_block = FocusedBlock::HiddenSsidInput;
                                    }
                                    KeyCode::Enter | KeyCode::Char(' ') => {
                                        toggle_connect(app, sender).await?
                                    }
                                    KeyCode::Char('j') | KeyCode::Down => {
                                        let total = station.new_networks_total_rows();
                                        if total > 0 {
                                            let i = match station.new_networks_state.selected() {
                                                Some(i) => {
                                                    if i < total - 1 { i + 1 } else { i }
                                                }
                                                None => 0,
                                            };
                                            station.new_networks_state.select(Some(i));
                                        }
                                    }
                                    KeyCode::Char('k') | KeyCode::Up => {
                                        if station.new_networks_total_rows() > 0 {
                                            let i = match station.new_networks_state.selected() {
                                                Some(i) => i.saturating_sub(1),
                                                None => 0,
                                            };
                                            station.new_networks_state.select(Some(i));
                                        }
                                    }
                                    _ => {}
                                },
                                _ => {}
                            },
                        }
                    }
                }
            } else {
                sender.send(Event::Reset(Mode::Station))?;
            }
        }

        Mode::Ap => {
            if let Some(ap) = &mut app.device.ap {
                match app.focused_block {
                    FocusedBlock::AccessPointInput => match key_event.code {
                        KeyCode::Enter => {
                            // Incomplete input keeps the form open
                            if ap.start(sender.clone()) {
                                app.focused_block = FocusedBlock::AccessPoint;
                            }
                        }

                        KeyCode::Esc => {
                            ap.reset_form();
                            app.focused_block = FocusedBlock::AccessPoint;
                        }
                        KeyCode::Tab => {
                            ap.toggle_focused_section();
                        }
                        _ => match ap.focused_section {
                            APFocusedSection::Ssid => {
                                ap.ssid
                                    .handle_event(&crossterm::event::Event::Key(key_event));
                            }
                            APFocusedSection::Psk => {
                                ap.psk
                                    .handle_event(&crossterm::event::Event::Key(key_event));
                            }
                        },
                    },

                    FocusedBlock::AdapterInfos => {
                        if key_event.code == KeyCode::Esc {
                            app.focused_block = FocusedBlock::Device;
                        }
                    }
                    _ => {
                        match key_event.code {
                            KeyCode::Char('q') => {
                                app.quit();
                            }
                            KeyCode::Esc if app.config.esc_quit => {
                                app.quit();
                            }

                            KeyCode::Char('c' | 'C') => {
                                if key_event.modifiers == KeyModifiers::CONTROL {
                                    app.quit();
                                }
                            }

                            // Switch mode
                            KeyCode::Char(c)
                                if c == config.switch
                                    && key_event.modifiers == KeyModifiers::CONTROL =>
                            {
                                app.reset.enable = true;
                            }

                            KeyCode::Tab => match app.focused_block {
                                FocusedBlock::Device => {
                                    app.focused_block = FocusedBlock::AccessPoint;
                                }
                                FocusedBlock::AccessPoint => {
                                    if ap.connected_devices.is_empty() {
                                        app.focused_block = FocusedBlock::Device;
                                    } else {
                                        app.focused_block =
                                            FocusedBlock::AccessPointConnectedDevices;
                                    }
                                }
                                FocusedBlock::AccessPointConnectedDevices => {
                                    app.focused_block = FocusedBlock::Device;
                                }

                                _ => {}
                            },

                            KeyCode::Char(c) if c == config.ap.start && !ap.started => {
                                app.focused_block = FocusedBlock::AccessPointInput;
                            }

                            KeyCode::Char(c) if c == config.ap.stop && ap.started => {
                                ap.stop(sender.clone());
                            }

                            _ => {
                                if app.focused_block == FocusedBlock::Device {
                                    match key_event.code {
                                        KeyCode::Char(c) if c == config.device.infos => {
                                            app.focused_block = FocusedBlock::AdapterInfos;
                                        }
                                        KeyCode::Char(c) if c == config.device.toggle_power => {
                                            toggle_device_power(sender, &app.device).await?;
                                        }
                                        _ => {}
                                    }
                                }
                            }
                        }
                    }
                }
            } else {
                sender.send(Event::Reset(Mode::Ap))?;
            }
        }
    }

    Ok(())
}
