use anyhow::Result;
pub mod auth;
pub mod known_network;
pub mod network;
pub mod share;

use std::sync::Arc;

use crate::iwd::{
    DiagnosticInfo, HiddenAccessPoint, IwdClient, KnownNetworkInfo, StationState, signal_percent,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Row, Table, TableState},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    app::FocusedBlock,
    config::Config,
    device::Device,
    mode::station::{known_network::KnownNetwork, share::Share},
    notification::{Notification, NotificationLevel},
};

use crate::event::Event;
use network::Network;

/// Result of resolving the selected known networks table index
pub enum KnownNetworkSelection {
    /// A known network that is currently in range, at the given index
    Network(usize),
    /// A provisioned network that is out of range, at the given index
    Unavailable(usize),
}

#[derive(Clone)]
pub struct Station {
    pub client: Arc<IwdClient>,
    pub device_path: String,
    pub state: StationState,
    pub is_scanning: bool,
    pub connected_network: Option<Network>,
    pub new_networks: Vec<(Network, i16)>,
    pub new_hidden_networks: Vec<HiddenAccessPoint>,
    pub known_networks: Vec<(Network, i16)>,
    pub unavailable_known_networks: Vec<KnownNetwork>,
    pub known_networks_state: TableState,
    pub new_networks_state: TableState,
    pub diagnostic: Option<DiagnosticInfo>,
    pub show_unavailable_known_networks: bool,
    pub show_hidden_networks: bool,
    pub share: Option<Share>,
}

impl Station {
    pub async fn new(client: Arc<IwdClient>, device_path: String) -> Result<Self> {
        let state = client.get_station_state(&device_path).await?;
        let is_scanning = client.is_station_scanning(&device_path).await.unwrap_or(false);

        // Kick off a scan right away; iwd fills in the ordered network
        // list asynchronously and the periodic refresh picks it up.
        let _ = client.request_scan(&device_path).await;

        let visible_networks = client.get_visible_networks(&device_path).await?;
        let provisioned = client.get_known_networks().await?;

        let (new_networks, known_networks, connected_network) =
            Self::categorize_networks(&client, &visible_networks, &provisioned);

        let unavailable_known_networks =
            Self::find_unavailable_networks(&client, &known_networks, provisioned);

        let new_hidden_networks = client
            .get_hidden_access_points(&device_path)
            .await
            .unwrap_or_default();

        let diagnostic =
            Self::fetch_diagnostic(&client, &device_path, connected_network.is_some()).await;

        Ok(Self {
            client,
            device_path,
            state,
            is_scanning,
            connected_network,
            new_networks_state: Self::table_state_for(&new_networks),
            new_networks,
            new_hidden_networks,
            known_networks_state: Self::table_state_for(&known_networks),
            known_networks,
            unavailable_known_networks,
            diagnostic,
            show_unavailable_known_networks: false,
            show_hidden_networks: false,
            share: None,
        })
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.state = self.client.get_station_state(&self.device_path).await?;
        self.is_scanning = self
            .client
            .is_station_scanning(&self.device_path)
            .await
            .unwrap_or(false);

        let visible_networks = self.client.get_visible_networks(&self.device_path).await?;
        let provisioned = self.client.get_known_networks().await?;

        let (new_networks, known_networks, connected_network) =
            Self::categorize_networks(&self.client, &visible_networks, &provisioned);

        self.update_network_list(
            &new_networks,
            |s| &mut s.new_networks,
            |s| &mut s.new_networks_state,
        );
        self.update_known_network_list(&known_networks);

        self.unavailable_known_networks =
            Self::find_unavailable_networks(&self.client, &self.known_networks, provisioned);

        self.new_hidden_networks = self
            .client
            .get_hidden_access_points(&self.device_path)
            .await
            .unwrap_or_default();

        self.connected_network = connected_network;
        self.diagnostic = Self::fetch_diagnostic(
            &self.client,
            &self.device_path,
            self.connected_network.is_some(),
        )
        .await;

        Ok(())
    }

    /// Split the ordered network list into known and new networks and
    /// pick out the connected one. iwd already orders by signal.
    fn categorize_networks(
        client: &Arc<IwdClient>,
        visible_networks: &[(crate::iwd::NetworkInfo, i16)],
        provisioned: &[KnownNetworkInfo],
    ) -> (Vec<(Network, i16)>, Vec<(Network, i16)>, Option<Network>) {
        let mut new_networks: Vec<(Network, i16)> = Vec::new();
        let mut known_networks: Vec<(Network, i16)> = Vec::new();
        let mut connected_network: Option<Network> = None;

        for (info, signal) in visible_networks {
            let known_network = info.known_network_path.as_ref().and_then(|known_path| {
                provisioned
                    .iter()
                    .find(|k| &k.path == known_path)
                    .map(|k| KnownNetwork::from_info(client.clone(), k.clone()))
            });

            let network = Network::from_info(client.clone(), info.clone(), known_network.clone());

            if network.is_connected {
                connected_network = Some(network.clone());
            }

            if known_network.is_some() {
                known_networks.push((network, *signal));
            } else {
                new_networks.push((network, *signal));
            }
        }

        (new_networks, known_networks, connected_network)
    }

    /// Provisioned networks that are not currently in range
    fn find_unavailable_networks(
        client: &Arc<IwdClient>,
        known_networks: &[(Network, i16)],
        provisioned: Vec<KnownNetworkInfo>,
    ) -> Vec<KnownNetwork> {
        let visible_paths: Vec<&str> = known_networks
            .iter()
            .filter_map(|(n, _)| n.known_network.as_ref().map(|k| k.path.as_str()))
            .collect();

        provisioned
            .into_iter()
            .filter(|k| !visible_paths.contains(&k.path.as_str()))
            .map(|k| KnownNetwork::from_info(client.clone(), k))
            .collect()
    }

    /// Link diagnostics, only meaningful while connected. The
    /// StationDiagnostic interface may be compiled out of iwd, so a
    /// failure here just means no diagnostics row.
    async fn fetch_diagnostic(
        client: &IwdClient,
        device_path: &str,
        is_connected: bool,
    ) -> Option<DiagnosticInfo> {
        if !is_connected {
            return None;
        }
        client.get_station_diagnostics(device_path).await.ok()
    }

    /// A TableState with the first row selected when there is one
    fn table_state_for<T>(items: &[T]) -> TableState {
        let mut state = TableState::default();
        state.select(if items.is_empty() { None } else { Some(0) });
        state
    }

    /// Refresh a network list in place, preserving the selection when
    /// the same set of networks is still visible.
    fn update_network_list(
        &mut self,
        fresh: &[(Network, i16)],
        get_list: fn(&mut Self) -> &mut Vec<(Network, i16)>,
        get_state: fn(&mut Self) -> &mut TableState,
    ) {
        let current = get_list(self);
        let same_set = current.len() == fresh.len()
            && current
                .iter()
                .all(|(net, _)| fresh.iter().any(|(n, _)| n.path == net.path));

        if same_set {
            current.iter_mut().for_each(|(net, signal)| {
                if let Some((fresh_net, new_signal)) =
                    fresh.iter().find(|(n, _)| n.path == net.path)
                {
                    net.is_connected = fresh_net.is_connected;
                    *signal = *new_signal;
                }
            });
        } else {
            let state = get_state(self);
            *state = Self::table_state_for(fresh);
            *get_list(self) = fresh.to_vec();
        }
    }

    /// Same as update_network_list, additionally syncing autoconnect
    fn update_known_network_list(&mut self, fresh: &[(Network, i16)]) {
        let same_set = self.known_networks.len() == fresh.len()
            && self
                .known_networks
                .iter()
                .all(|(net, _)| fresh.iter().any(|(n, _)| n.path == net.path));

        if same_set {
            self.known_networks.iter_mut().for_each(|(net, signal)| {
                if let Some((fresh_net, new_signal)) =
                    fresh.iter().find(|(n, _)| n.path == net.path)
                {
                    net.is_connected = fresh_net.is_connected;
                    if let Some(known) = &mut net.known_network
                        && let Some(fresh_known) = &fresh_net.known_network
                    {
                        known.is_autoconnect = fresh_known.is_autoconnect;
                        known.last_connected = fresh_known.last_connected;
                    }
                    *signal = *new_signal;
                }
            });
        } else {
            self.known_networks_state = Self::table_state_for(fresh);
            self.known_networks = fresh.to_vec();
        }
    }

    pub async fn scan(&mut self, sender: UnboundedSender<Event>) -> Result<()> {
        match self.client.request_scan(&self.device_path).await {
            Ok(()) => {
                self.is_scanning = true;
                Notification::send(
                    "Start Scanning".to_string(),
                    NotificationLevel::Info,
                    &sender,
                )?;
            }
            Err(e) => {
                // iwd answers net.connman.iwd.Busy while a scan is
                // already running
                let msg = e.to_string();
                if msg.contains("Busy") || msg.contains("in progress") {
                    Notification::send(
                        "Scanning in progress".to_string(),
                        NotificationLevel::Info,
                        &sender,
                    )?;
                } else {
                    log::warn!("Scan request failed: {e:#}");
                    Notification::send(
                        "Failed to start scan".to_string(),
                        NotificationLevel::Error,
                        &sender,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Resolve the selected known networks table row to a typed
    /// selection, accounting for the unavailable networks shown below
    /// the in-range ones.
    pub fn resolve_known_selection(&self) -> Option<KnownNetworkSelection> {
        resolve_selection(
            self.known_networks_state.selected(),
            self.known_networks.len(),
            self.unavailable_known_networks.len(),
        )
    }

    pub fn known_networks_total_rows(&self) -> usize {
        let unavail = if self.show_unavailable_known_networks {
            self.unavailable_known_networks.len()
        } else {
            0
        };
        self.known_networks.len() + unavail
    }

    pub fn new_networks_total_rows(&self) -> usize {
        let hidden = if self.show_hidden_networks {
            self.new_hidden_networks.len()
        } else {
            0
        };
        self.new_networks.len() + hidden
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        focused_block: FocusedBlock,
        device: &Device,
        config: Arc<Config>,
    ) {
        let (known_networks_block, new_networks_block, device_block, help_block) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(5),
                    Constraint::Min(5),
                    Constraint::Length(5),
                    Constraint::Length(2),
                ])
                .margin(1)
                .split(frame.area());
            (chunks[0], chunks[1], chunks[2], chunks[3])
        };

        //
        // Device
        //
        let row = Row::new(vec![
            Line::from(device.name.clone()).centered(),
            Line::from("station").centered(),
            {
                if device.is_powered {
                    Line::from("On").centered()
                } else {
                    Line::from("Off").centered()
                }
            },
            Line::from(self.state.to_string()).centered(),
            Line::from(if self.is_scanning { "Yes" } else { "No" }).centered(),
            Line::from({
                if let Some(diagnostic) = &self.diagnostic {
                    if let Some(freq) = diagnostic.frequency {
                        format!("{:.3} GHz", freq as f32 / 1000.)
                    } else {
                        "-".to_string()
                    }
                } else {
                    "-".to_string()
                }
            })
            .centered(),
            Line::from({
                if let Some(diagnostic) = &self.diagnostic {
                    diagnostic.security.clone().unwrap_or("-".to_string())
                } else {
                    "-".to_string()
                }
            })
            .centered(),
        ]);

        let widths = [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(15),
        ];

        let device_table = Table::new(vec![row], widths)
            .header({
                if focused_block == FocusedBlock::Device {
                    Row::new(vec![
                        Line::from("Name").yellow().centered(),
                        Line::from("Mode").yellow().centered(),
                        Line::from("Powered").yellow().centered(),
                        Line::from("State").yellow().centered(),
                        Line::from("Scanning").yellow().centered(),
                        Line::from("Frequency").yellow().centered(),
                        Line::from("Security").yellow().centered(),
                    ])
                    .style(Style::new().bold())
                    .bottom_margin(1)
                } else {
                    Row::new(vec![
                        Line::from("Name").centered(),
                        Line::from("Mode").centered(),
                        Line::from("Powered").centered(),
                        Line::from("State").centered(),
                        Line::from("Scanning").centered(),
                        Line::from("Frequency").centered(),
                        Line::from("Security").centered(),
                    ])
                    .bottom_margin(1)
                }
            })
            .block(
                Block::default()
                    .title(" Device ")
                    .title_style({
                        if focused_block == FocusedBlock::Device {
                            Style::default().bold()
                        } else {
                            Style::default()
                        }
                    })
                    .borders(Borders::ALL)
                    .border_style({
                        if focused_block == FocusedBlock::Device {
                            Style::default().fg(Color::Green)
                        } else {
                            Style::default()
                        }
                    })
                    .border_type({
                        if focused_block == FocusedBlock::Device {
                            BorderType::Thick
                        } else {
                            BorderType::default()
                        }
                    })
                    .padding(Padding::horizontal(1)),
            )
            .column_spacing(1)
            .flex(Flex::SpaceAround)
            .row_highlight_style(if focused_block == FocusedBlock::Device {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            });

        let mut device_state = TableState::default().with_selected(0);
        frame.render_stateful_widget(device_table, device_block, &mut device_state);

        //
        // Known networks
        //
        let mut rows: Vec<Row> = self
            .known_networks
            .iter()
            .map(|(net, signal)| {
                let known = net.known_network.as_ref();
                let signal_str = format!("{}%", signal_percent(*signal));

                let last_connected = known
                    .and_then(|k| k.last_connected)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());

                let icon = if net.is_connected { "󰖩 " } else { "" };

                Row::new(vec![
                    Line::from(icon).centered(),
                    Line::from(net.name.clone()).centered(),
                    Line::from(net.security.to_string()).centered(),
                    Line::from(if known.is_some_and(|k| k.is_hidden) {
                        "Yes"
                    } else {
                        "No"
                    })
                    .centered(),
                    Line::from(if known.is_some_and(|k| k.is_autoconnect) {
                        "Yes"
                    } else {
                        "No"
                    })
                    .centered(),
                    Line::from(last_connected).centered(),
                    Line::from(signal_str).centered(),
                ])
            })
            .collect();

        if self.show_unavailable_known_networks {
            self.unavailable_known_networks.iter().for_each(|net| {
                let last_connected = net
                    .last_connected
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());

                let row = Row::new(vec![
                    Line::from(""),
                    Line::from(net.name.clone()).centered(),
                    Line::from(net.security.to_string()).centered(),
                    Line::from(if net.is_hidden { "Yes" } else { "No" }).centered(),
                    Line::from(if net.is_autoconnect { "Yes" } else { "No" }).centered(),
                    Line::from(last_connected).centered(),
                    Line::from(""),
                ])
                .fg(Color::DarkGray);

                rows.push(row);
            });
        }

        let widths = [
            Constraint::Length(2),
            Constraint::Length(25),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(6),
        ];

        let known_networks_table = Table::new(rows, widths)
            .header({
                if focused_block == FocusedBlock::KnownNetworks {
                    Row::new(vec![
                        Line::from(""),
                        Line::from("Name").yellow().centered(),
                        Line::from("Security").yellow().centered(),
                        Line::from("Hidden").yellow().centered(),
                        Line::from("Auto Connect").yellow().centered(),
                        Line::from("Last Connected").yellow().centered(),
                        Line::from("Signal").yellow().centered(),
                    ])
                    .style(Style::new().bold())
                    .bottom_margin(1)
                } else {
                    Row::new(vec![
                        Line::from(""),
                        Line::from("Name").centered(),
                        Line::from("Security").centered(),
                        Line::from("Hidden").centered(),
                        Line::from("Auto Connect").centered(),
                        Line::from("Last Connected").centered(),
                        Line::from("Signal").centered(),
                    ])
                    .bottom_margin(1)
                }
            })
            .block(
                Block::default()
                    .title(" Known Networks ")
                    .title_style({
                        if focused_block == FocusedBlock::KnownNetworks {
                            Style::default().bold()
                        } else {
                            Style::default()
                        }
                    })
                    .borders(Borders::ALL)
                    .border_style({
                        if focused_block == FocusedBlock::KnownNetworks {
                            Style::default().fg(Color::Green)
                        } else {
                            Style::default()
                        }
                    })
                    .border_type({
                        if focused_block == FocusedBlock::KnownNetworks {
                            BorderType::Thick
                        } else {
                            BorderType::default()
                        }
                    })
                    .padding(Padding::horizontal(1)),
            )
            .column_spacing(1)
            .flex(Flex::SpaceAround)
            .row_highlight_style(if focused_block == FocusedBlock::KnownNetworks {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            });

        frame.render_stateful_widget(
            known_networks_table,
            known_networks_block,
            &mut self.known_networks_state,
        );

        //
        // New networks
        //
        let mut rows: Vec<Row> = self
            .new_networks
            .iter()
            .map(|(net, signal)| {
                let percent = signal_percent(*signal);
                Row::new(vec![
                    Line::from(net.name.clone()).centered(),
                    Line::from(net.security.to_string()).centered(),
                    Line::from({
                        match percent {
                            n if n >= 75 => format!("{percent:3}% 󰤨"),
                            n if (50..75).contains(&n) => format!("{percent:3}% 󰤥"),
                            n if (25..50).contains(&n) => format!("{percent:3}% 󰤢"),
                            _ => format!("{percent:3}% 󰤟"),
                        }
                    })
                    .centered(),
                ])
            })
            .collect();

        if self.show_hidden_networks {
            self.new_hidden_networks.iter().for_each(|ap| {
                let percent = signal_percent(ap.signal_strength);
                rows.push(
                    Row::new(vec![
                        Line::from(ap.address.clone()).centered(),
                        Line::from(ap.security.to_string()).centered(),
                        Line::from({
                            match percent {
                                n if n >= 75 => format!("{percent:3}% 󰤨"),
                                n if (50..75).contains(&n) => format!("{percent:3}% 󰤥"),
                                n if (25..50).contains(&n) => format!("{percent:3}% 󰤢"),
                                _ => format!("{percent:3}% 󰤟"),
                            }
                        })
                        .centered(),
                    ])
                    .dark_gray(),
                )
            })
        };

        let widths = [
            Constraint::Length(25),
            Constraint::Length(15),
            Constraint::Length(8),
        ];

        let new_networks_table = Table::new(rows, widths)
            .header({
                if focused_block == FocusedBlock::NewNetworks {
                    Row::new(vec![
                        Line::from("Name").yellow().centered(),
                        Line::from("Security").yellow().centered(),
                        Line::from("Signal").yellow().centered(),
                    ])
                    .style(Style::new().bold())
                    .bottom_margin(1)
                } else {
                    Row::new(vec![
                        Line::from("Name").centered(),
                        Line::from("Security").centered(),
                        Line::from("Signal").centered(),
                    ])
                    .bottom_margin(1)
                }
            })
            .block(
                Block::default()
                    .title(" New Networks ")
                    .title_style({
                        if focused_block == FocusedBlock::NewNetworks {
                            Style::default().bold()
                        } else {
                            Style::default()
                        }
                    })
                    .borders(Borders::ALL)
                    .border_style({
                        if focused_block == FocusedBlock::NewNetworks {
                            Style::default().fg(Color::Green)
                        } else {
                            Style::default()
                        }
                    })
                    .border_type({
                        if focused_block == FocusedBlock::NewNetworks {
                            BorderType::Thick
                        } else {
                            BorderType::default()
                        }
                    })
                    .padding(Padding::horizontal(1)),
            )
            .column_spacing(1)
            .flex(Flex::SpaceAround)
            .row_highlight_style(if focused_block == FocusedBlock::NewNetworks {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            });

        frame.render_stateful_widget(
            new_networks_table,
            new_networks_block,
            &mut self.new_networks_state,
        );

        let help_message = match focused_block {
            FocusedBlock::Device => vec![Line::from(vec![
                Span::from(config.station.start_scanning.to_string()).bold(),
                Span::from(" Scan"),
                Span::from(" | "),
                Span::from(config.device.infos.to_string()).bold(),
                Span::from(" Infos"),
                Span::from(" | "),
                Span::from(config.device.toggle_power.to_string()).bold(),
                Span::from(" Toggle Power"),
                Span::from(" | "),
                Span::from("ctrl+r").bold(),
                Span::from(" Switch Mode"),
                Span::from(" | "),
                Span::from("⇄").bold(),
                Span::from(" Nav"),
            ])],
            FocusedBlock::KnownNetworks => {
                if frame.area().width <= 130 {
                    vec![
                        Line::from(vec![
                            Span::from("󱁐  or ↵ ").bold(),
                            Span::from(" Dis/connect"),
                            Span::from(" | "),
                            Span::from(config.station.known_network.show_all.to_string()).bold(),
                            Span::from(" Show All"),
                            Span::from(" | "),
                            Span::from(config.station.known_network.remove.to_string()).bold(),
                            Span::from(" Remove"),
                            Span::from(" | "),
                            Span::from(config.station.known_network.share.to_string()).bold(),
                            Span::from(" Share"),
                            Span::from(" | "),
                            Span::from(config.station.start_scanning.to_string()).bold(),
                            Span::from(" Scan"),
                        ]),
                        Line::from(vec![
                            Span::from("k,").bold(),
                            Span::from("  Up"),
                            Span::from(" | "),
                            Span::from("j,").bold(),
                            Span::from("  Down"),
                            Span::from(" | "),
                            Span::from("⇄").bold(),
                            Span::from(" Nav"),
                            Span::from(" | "),
                            Span::from("ctrl+r").bold(),
                            Span::from(" Switch Mode"),
                            Span::from(" | "),
                            Span::from(
                                config.station.known_network.toggle_autoconnect.to_string(),
                            )
                            .bold(),
                            Span::from(" Autoconnect"),
                        ]),
                    ]
                } else {
                    vec![Line::from(vec![
                        Span::from("k,").bold(),
                        Span::from("  Up"),
                        Span::from(" | "),
                        Span::from("j,").bold(),
                        Span::from("  Down"),
                        Span::from(" | "),
                        Span::from("󱁐  or ↵ ").bold(),
                        Span::from(" Dis/connect"),
                        Span::from(" | "),
                        Span::from(config.station.known_network.show_all.to_string()).bold(),
                        Span::from(" Show All"),
                        Span::from(" | "),
                        Span::from(config.station.known_network.remove.to_string()).bold(),
                        Span::from(" Remove"),
                        Span::from(" | "),
                        Span::from(config.station.known_network.toggle_autoconnect.to_string())
                            .bold(),
                        Span::from(" Autoconnect"),
                        Span::from(" | "),
                        Span::from(config.station.start_scanning.to_string()).bold(),
                        Span::from(" Scan"),
                        Span::from(" | "),
                        Span::from(config.station.known_network.share.to_string()).bold(),
                        Span::from(" Share"),
                        Span::from(" | "),
                        Span::from("ctrl+r").bold(),
                        Span::from(" Switch Mode"),
                        Span::from(" | "),
                        Span::from("⇄").bold(),
                        Span::from(" Nav"),
                    ])]
                }
            }
            FocusedBlock::NewNetworks => {
                if frame.area().width < 80 {
                    vec![
                        Line::from(vec![
                            Span::from("󱁐  or ↵ ").bold(),
                            Span::from(" Connect"),
                            Span::from(" | "),
                            Span::from(config.station.new_network.connect_hidden.to_string())
                                .bold(),
                            Span::from(" Hidden"),
                            Span::from(" | "),
                            Span::from(config.station.start_scanning.to_string()).bold(),
                            Span::from(" Scan"),
                        ]),
                        Line::from(vec![
                            Span::from("k,").bold(),
                            Span::from("  Up"),
                            Span::from(" | "),
                            Span::from("j,").bold(),
                            Span::from("  Down"),
                            Span::from(" | "),
                            Span::from("ctrl+r").bold(),
                            Span::from(" Switch Mode"),
                            Span::from(" | "),
                            Span::from("⇄").bold(),
                            Span::from(" Nav"),
                        ]),
                    ]
                } else {
                    vec![Line::from(vec![
                        Span::from("k,").bold(),
                        Span::from("  Up"),
                        Span::from(" | "),
                        Span::from("j,").bold(),
                        Span::from("  Down"),
                        Span::from(" | "),
                        Span::from("󱁐  or ↵ ").bold(),
                        Span::from(" Connect"),
                        Span::from(" | "),
                        Span::from(config.station.new_network.connect_hidden.to_string()).bold(),
                        Span::from(" Hidden"),
                        Span::from(" | "),
                        Span::from(config.station.new_network.show_all.to_string()).bold(),
                        Span::from(" Show All"),
                        Span::from(" | "),
                        Span::from(config.station.start_scanning.to_string()).bold(),
                        Span::from(" Scan"),
                        Span::from(" | "),
                        Span::from("ctrl+r").bold(),
                        Span::from(" Switch Mode"),
                        Span::from(" | "),
                        Span::from("⇄").bold(),
                        Span::from(" Nav"),
                    ])]
                }
            }
            FocusedBlock::AdapterInfos => {
                vec![Line::from(vec![
                    Span::from("󱊷 ").bold(),
                    Span::from(" Discard"),
                ])]
            }
            FocusedBlock::PskAuthKey => vec![Line::from(vec![
                Span::from(" ↵ ").bold(),
                Span::from(" Apply"),
                Span::from(" | "),
                Span::from("⇄").bold(),
                Span::from(" Hide/Show password"),
                Span::from(" | "),
                Span::from("󱊷 ").bold(),
                Span::from(" Discard"),
            ])],
            FocusedBlock::HiddenSsidInput => vec![Line::from(vec![
                Span::from(" ↵ ").bold(),
                Span::from(" Connect"),
                Span::from(" | "),
                Span::from("󱊷 ").bold(),
                Span::from(" Discard"),
            ])],
            _ => vec![Line::from(vec![
                Span::from("󱊷 ").bold(),
                Span::from(" Discard"),
            ])],
        };

        let help_message = Paragraph::new(help_message).centered().blue();

        frame.render_widget(help_message, help_block);

        if let Some(share) = &self.share {
            share.render(frame);
        }
    }
}

/// Map a flat table row index onto the known networks followed by the
/// unavailable ones
fn resolve_selection(
    selected: Option<usize>,
    known: usize,
    unavailable: usize,
) -> Option<KnownNetworkSelection> {
    let selected = selected?;
    if selected < known {
        Some(KnownNetworkSelection::Network(selected))
    } else {
        let unavail_index = selected - known;
        if unavail_index < unavailable {
            Some(KnownNetworkSelection::Unavailable(unavail_index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_onto_known_then_unavailable() {
        assert!(matches!(
            resolve_selection(Some(1), 2, 2),
            Some(KnownNetworkSelection::Network(1))
        ));
        assert!(matches!(
            resolve_selection(Some(2), 2, 2),
            Some(KnownNetworkSelection::Unavailable(0))
        ));
        assert!(resolve_selection(Some(4), 2, 2).is_none());
    }

    #[test]
    fn selection_is_none_without_rows() {
        assert!(resolve_selection(None, 0, 0).is_none());
        assert!(resolve_selection(Some(0), 0, 0).is_none());
    }
}
