use anyhow::Result;
use std::sync::Arc;

use crate::iwd::{IwdClient, Mode};
use crate::rfkill;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Row, Table, TableState},
};

use crate::{
    app::FocusedBlock,
    config::Config,
    mode::{ap::AccessPoint, station::Station},
};

#[derive(Clone)]
pub struct Device {
    client: Arc<IwdClient>,
    pub device_path: String,
    pub name: String,
    pub address: String,
    pub mode: Mode,
    pub is_powered: bool,
    pub station: Option<Station>,
    pub ap: Option<AccessPoint>,
}

impl Device {
    pub async fn new(client: Arc<IwdClient>) -> Result<Self> {
        let device_path = client.get_device().await?;
        let device_path = device_path.to_string();

        let name = client.get_device_name(&device_path).await?;
        let address = client.get_device_address(&device_path).await?;
        let is_powered = client.is_device_powered(&device_path).await?;
        let mode = client.get_device_mode(&device_path).await?;

        let (station, ap) = if is_powered {
            match mode {
                Mode::Station => (
                    Station::new(client.clone(), device_path.clone()).await.ok(),
                    None,
                ),
                Mode::Ap => (
                    None,
                    AccessPoint::new(client.clone(), device_path.clone())
                        .await
                        .ok(),
                ),
            }
        } else {
            (None, None)
        };

        Ok(Self {
            client,
            device_path,
            name,
            address,
            mode,
            is_powered,
            station,
            ap,
        })
    }

    /// Flip the device Mode property. iwd tears down the old interface
    /// and brings up the new one, so the matching model is rebuilt.
    pub async fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.client.set_device_mode(&self.device_path, mode).await?;
        self.mode = mode;

        match mode {
            Mode::Station => {
                self.ap = None;
                if self.is_powered {
                    self.station = Station::new(self.client.clone(), self.device_path.clone())
                        .await
                        .ok();
                }
            }
            Mode::Ap => {
                self.station = None;
                if self.is_powered {
                    self.ap = AccessPoint::new(self.client.clone(), self.device_path.clone())
                        .await
                        .ok();
                }
            }
        }

        Ok(())
    }

    pub async fn power_off(&self) -> Result<()> {
        self.client
            .set_device_powered(&self.device_path, false)
            .await
    }

    /// Powering on fails when rfkill blocks the radio; say so instead
    /// of surfacing a bare daemon error.
    pub async fn power_on(&self) -> Result<()> {
        if let Err(e) = self.client.set_device_powered(&self.device_path, true).await {
            return match rfkill::wlan_block_state() {
                Ok(rfkill::BlockState::HardBlocked) => {
                    Err(anyhow::anyhow!("Radio is hard-blocked by rfkill"))
                }
                Ok(rfkill::BlockState::SoftBlocked) => Err(anyhow::anyhow!(
                    "Radio is soft-blocked by rfkill. Run: rfkill unblock wlan"
                )),
                _ => Err(e),
            };
        }
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.is_powered = self.client.is_device_powered(&self.device_path).await?;

        if self.is_powered {
            match self.mode {
                Mode::Station => {
                    if let Some(station) = &mut self.station {
                        station.refresh().await?;
                    } else {
                        self.station = Station::new(self.client.clone(), self.device_path.clone())
                            .await
                            .ok();
                    }
                }
                Mode::Ap => {
                    if let Some(ap) = &mut self.ap {
                        ap.refresh().await?;
                    } else {
                        self.ap = AccessPoint::new(self.client.clone(), self.device_path.clone())
                            .await
                            .ok();
                    }
                }
            }
        } else {
            self.station = None;
            self.ap = None;
        }
        Ok(())
    }

    /// Fallback view while the device is powered off
    pub fn render(&mut self, frame: &mut Frame, focused_block: FocusedBlock, config: Arc<Config>) {
        let (device_block, help_block) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(5),
                    Constraint::Length(1),
                ])
                .margin(1)
                .split(frame.area());
            (chunks[1], chunks[2])
        };

        let row = Row::new(vec![Line::from(self.name.clone()).centered(), {
            if self.is_powered {
                Line::from("On").centered()
            } else {
                Line::from("Off").centered()
            }
        }]);

        let widths = [Constraint::Length(10), Constraint::Length(8)];

        let device_table = Table::new(vec![row], widths)
            .header({
                Row::new(vec![
                    Line::from("Name").yellow().centered(),
                    Line::from("Powered").yellow().centered(),
                ])
                .style(Style::new().bold())
                .bottom_margin(1)
            })
            .block(
                Block::default()
                    .title(" Device ")
                    .title_style(Style::default().bold())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .border_type(BorderType::Thick)
                    .padding(Padding::horizontal(1)),
            )
            .column_spacing(1)
            .flex(Flex::SpaceAround)
            .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

        let mut device_state = TableState::default().with_selected(0);
        frame.render_stateful_widget(device_table, device_block, &mut device_state);

        let help_message = match focused_block {
            FocusedBlock::Device => Line::from(vec![
                Span::from(config.device.infos.to_string()).bold(),
                Span::from(" Infos"),
                Span::from(" | "),
                Span::from(config.device.toggle_power.to_string()).bold(),
                Span::from(" Toggle Power"),
            ]),
            FocusedBlock::AdapterInfos => {
                Line::from(vec![Span::from("󱊷 ").bold(), Span::from(" Discard")])
            }
            _ => Line::from(""),
        };

        let help_message = help_message.centered().blue();

        frame.render_widget(help_message, help_block);
    }
}
