use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Row, Table, TableState},
};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;

use crate::{
    app::FocusedBlock,
    call::{self, CallKind},
    config::Config,
    device::Device,
    event::Event,
    iwd::IwdClient,
};

pub const PSK_MIN_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APFocusedSection {
    Ssid,
    Psk,
}

#[derive(Clone)]
pub struct AccessPoint {
    pub client: Arc<IwdClient>,
    pub device_path: String,
    pub started: bool,
    pub name: Option<String>,
    pub connected_devices: Vec<String>,
    pub ssid: Input,
    pub psk: Input,
    pub focused_section: APFocusedSection,
    pub ap_start: Arc<AtomicBool>,
}

impl AccessPoint {
    pub async fn new(client: Arc<IwdClient>, device_path: String) -> Result<Self> {
        let started = client
            .is_access_point_started(&device_path)
            .await
            .unwrap_or(false);
        let name = client.get_access_point_name(&device_path).await?;

        let connected_devices = if started {
            client
                .get_access_point_clients(&device_path)
                .await
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            client,
            device_path,
            started,
            name,
            connected_devices,
            ssid: Input::default(),
            psk: Input::default(),
            focused_section: APFocusedSection::Ssid,
            ap_start: Arc::new(AtomicBool::new(false)),
        })
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.started = self
            .client
            .is_access_point_started(&self.device_path)
            .await
            .unwrap_or(false);
        self.name = self.client.get_access_point_name(&self.device_path).await?;

        if self.started {
            self.ap_start.store(false, Ordering::Relaxed);
            self.connected_devices = self
                .client
                .get_access_point_clients(&self.device_path)
                .await
                .unwrap_or_default();
        } else {
            self.connected_devices.clear();
        }

        Ok(())
    }

    /// Validate the form and dispatch the Start call. Incomplete input
    /// keeps the form open without issuing anything; returns whether a
    /// call was dispatched.
    pub fn start(&mut self, sender: UnboundedSender<Event>) -> bool {
        let Some((ssid, psk)) = validate(self.ssid.value(), self.psk.value()) else {
            return false;
        };

        self.reset_form();
        self.ap_start.store(true, Ordering::Relaxed);

        let client = self.client.clone();
        let device_path = self.device_path.clone();
        let ap_start = self.ap_start.clone();
        call::dispatch(CallKind::ApStart, sender, async move {
            let outcome = client.start_access_point(&device_path, &ssid, &psk).await;
            if outcome.is_err() {
                ap_start.store(false, Ordering::Relaxed);
            }
            outcome
        });
        true
    }

    pub fn stop(&self, sender: UnboundedSender<Event>) {
        let client = self.client.clone();
        let device_path = self.device_path.clone();
        call::dispatch(CallKind::ApStop, sender, async move {
            client.stop_access_point(&device_path).await
        });
    }

    pub fn reset_form(&mut self) {
        self.ssid.reset();
        self.psk.reset();
        self.focused_section = APFocusedSection::Ssid;
    }

    pub fn toggle_focused_section(&mut self) {
        self.focused_section = match self.focused_section {
            APFocusedSection::Ssid => APFocusedSection::Psk,
            APFocusedSection::Psk => APFocusedSection::Ssid,
        };
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        focused_block: FocusedBlock,
        device: &Device,
        config: Arc<Config>,
    ) {
        let (ap_block, connected_devices_block, device_block, help_block) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(7),
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
            Line::from("ap").centered(),
            {
                if device.is_powered {
                    Line::from("On").centered()
                } else {
                    Line::from("Off").centered()
                }
            },
            Line::from(device.address.clone()).centered(),
        ]);

        let widths = [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(20),
        ];

        let device_table = Table::new(vec![row], widths)
            .header({
                if focused_block == FocusedBlock::Device {
                    Row::new(vec![
                        Line::from("Name").yellow().centered(),
                        Line::from("Mode").yellow().centered(),
                        Line::from("Powered").yellow().centered(),
                        Line::from("Address").yellow().centered(),
                    ])
                    .style(Style::new().bold())
                    .bottom_margin(1)
                } else {
                    Row::new(vec![
                        Line::from("Name").centered(),
                        Line::from("Mode").centered(),
                        Line::from("Powered").centered(),
                        Line::from("Address").centered(),
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
            .flex(Flex::SpaceAround);

        frame.render_widget(device_table, device_block);

        //
        // Access point
        //
        let ap_status = if self.started {
            Line::from(vec![
                Span::from("Started: "),
                Span::from(self.name.clone().unwrap_or_default()).bold().green(),
            ])
        } else if self.ap_start.load(Ordering::Relaxed) {
            Line::from("Starting ...").yellow()
        } else {
            Line::from("Not started").dim()
        };

        let ap_paragraph = Paragraph::new(vec![
            Line::from(""),
            ap_status,
            Line::from(""),
            Line::from(vec![
                Span::from("Connected stations: "),
                Span::from(self.connected_devices.len().to_string()).bold(),
            ]),
        ])
        .block(
            Block::default()
                .title(" Access Point ")
                .title_style({
                    if focused_block == FocusedBlock::AccessPoint {
                        Style::default().bold()
                    } else {
                        Style::default()
                    }
                })
                .borders(Borders::ALL)
                .border_style({
                    if focused_block == FocusedBlock::AccessPoint {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    }
                })
                .border_type({
                    if focused_block == FocusedBlock::AccessPoint {
                        BorderType::Thick
                    } else {
                        BorderType::default()
                    }
                })
                .padding(Padding::horizontal(1)),
        );

        frame.render_widget(ap_paragraph, ap_block);

        //
        // Connected stations
        //
        let rows: Vec<Row> = self
            .connected_devices
            .iter()
            .map(|address| Row::new(vec![Line::from(address.clone()).centered()]))
            .collect();

        let connected_devices_table = Table::new(rows, [Constraint::Length(20)])
            .header({
                if focused_block == FocusedBlock::AccessPointConnectedDevices {
                    Row::new(vec![Line::from("Address").yellow().centered()])
                        .style(Style::new().bold())
                        .bottom_margin(1)
                } else {
                    Row::new(vec![Line::from("Address").centered()]).bottom_margin(1)
                }
            })
            .block(
                Block::default()
                    .title(" Connected Stations ")
                    .title_style({
                        if focused_block == FocusedBlock::AccessPointConnectedDevices {
                            Style::default().bold()
                        } else {
                            Style::default()
                        }
                    })
                    .borders(Borders::ALL)
                    .border_style({
                        if focused_block == FocusedBlock::AccessPointConnectedDevices {
                            Style::default().fg(Color::Green)
                        } else {
                            Style::default()
                        }
                    })
                    .border_type({
                        if focused_block == FocusedBlock::AccessPointConnectedDevices {
                            BorderType::Thick
                        } else {
                            BorderType::default()
                        }
                    })
                    .padding(Padding::horizontal(1)),
            )
            .column_spacing(1)
            .flex(Flex::SpaceAround);

        let mut devices_state = TableState::default();
        frame.render_stateful_widget(
            connected_devices_table,
            connected_devices_block,
            &mut devices_state,
        );

        let help_message = match focused_block {
            FocusedBlock::AccessPoint | FocusedBlock::AccessPointConnectedDevices => {
                vec![Line::from(vec![
                    Span::from(config.ap.start.to_string()).bold(),
                    Span::from(" Start"),
                    Span::from(" | "),
                    Span::from(config.ap.stop.to_string()).bold(),
                    Span::from(" Stop"),
                    Span::from(" | "),
                    Span::from(config.device.toggle_power.to_string()).bold(),
                    Span::from(" Toggle Power"),
                    Span::from(" | "),
                    Span::from("ctrl+r").bold(),
                    Span::from(" Switch Mode"),
                    Span::from(" | "),
                    Span::from("⇄").bold(),
                    Span::from(" Nav"),
                ])]
            }
            FocusedBlock::AccessPointInput => vec![Line::from(vec![
                Span::from(" ↵ ").bold(),
                Span::from(" Start"),
                Span::from(" | "),
                Span::from("⇄").bold(),
                Span::from(" Switch SSID/PSK"),
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

        if focused_block == FocusedBlock::AccessPointInput {
            self.render_input_popup(frame);
        }
    }

    fn render_input_popup(&self, frame: &mut Frame) {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(9),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area());

        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(60),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(popup_layout[1])[1];

        frame.render_widget(Clear, area);

        frame.render_widget(
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .title(" Start Access Point ")
                .title_style(Style::default().bold().fg(Color::White))
                .border_style(Style::default().fg(Color::Green))
                .padding(Padding::new(2, 2, 1, 0)),
            area,
        );

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // SSID label
                Constraint::Length(1), // SSID input
                Constraint::Length(1), // PSK label
                Constraint::Length(1), // PSK input
                Constraint::Length(1), // hints
            ])
            .split(Block::new().padding(Padding::new(2, 2, 1, 0)).inner(area));

        let ssid_focused = self.focused_section == APFocusedSection::Ssid;

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("SSID").bold(),
                Span::raw(" *").fg(Color::Green),
            ])),
            inner[0],
        );
        let ssid_input = Paragraph::new(if self.ssid.value().is_empty() {
            Line::from(Span::raw("Network name").dim())
        } else {
            Line::from(self.ssid.value().to_string())
        })
        .style(if ssid_focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        });
        frame.render_widget(ssid_input, inner[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Passphrase").bold(),
                Span::raw(" * (8 characters minimum)").fg(Color::Green),
            ])),
            inner[2],
        );
        let psk_input = Paragraph::new(if self.psk.value().is_empty() {
            Line::from(Span::raw("Passphrase").dim())
        } else {
            Line::from(self.psk.value().to_string())
        })
        .style(if ssid_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        });
        frame.render_widget(psk_input, inner[3]);

        let hints = Paragraph::new(
            Line::from(vec![
                Span::raw("Enter").bold(),
                Span::raw(" Start  "),
                Span::raw("Tab").bold(),
                Span::raw(" Next field  "),
                Span::raw("Esc").bold(),
                Span::raw(" Cancel"),
            ])
            .centered(),
        )
        .dim();
        frame.render_widget(hints, inner[4]);

        let (input, input_area) = if ssid_focused {
            (&self.ssid, inner[1])
        } else {
            (&self.psk, inner[3])
        };
        let cursor_x = input_area.x + input.visual_cursor().min(input.value().len()) as u16;
        frame.set_cursor_position((cursor_x, input_area.y));
    }
}

/// An AP needs a non-empty SSID and a WPA2 passphrase of at least 8
/// characters. Anything less keeps the form open.
fn validate(ssid: &str, psk: &str) -> Option<(String, String)> {
    if ssid.is_empty() || psk.len() < PSK_MIN_LEN {
        return None;
    }
    Some((ssid.to_string(), psk.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ap_form_rejects_incomplete_input() {
        assert_eq!(validate("", "long enough"), None);
        assert_eq!(validate("MyHotspot", ""), None);
        assert_eq!(validate("MyHotspot", "short"), None);
    }

    #[test]
    fn ap_form_accepts_valid_input() {
        assert_eq!(
            validate("MyHotspot", "hunter22"),
            Some(("MyHotspot".to_string(), "hunter22".to_string()))
        );
    }
}
