use anyhow::{Context, Result};
use qrcode::QrCode;
use std::{cmp, fs};
use tui_qrcode::{Colors, QrCodeWidget};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear},
};

const IWD_STORAGE_DIR: &str = "/var/lib/iwd";

/// QR popup sharing the passphrase of a provisioned PSK network
#[derive(Clone)]
pub struct Share {
    pub qr_code: QrCode,
    pub network_name: String,
    pub passphrase: String,
}

impl Share {
    pub fn new(network_name: String) -> Result<Self> {
        // iwd keeps one provisioning file per network under
        // /var/lib/iwd, named <encoded-ssid>.psk
        let path = format!("{}/{}.psk", IWD_STORAGE_DIR, encode_ssid(&network_name));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read provisioning file {path}"))?;

        let passphrase = parse_passphrase(&content)
            .with_context(|| format!("No passphrase stored for network {network_name}"))?;

        let message = format!("WIFI:T:WPA;S:{network_name};P:{passphrase};;");
        let qr_code = QrCode::new(message)?;

        Ok(Self {
            qr_code,
            network_name,
            passphrase,
        })
    }

    pub fn render(&self, frame: &mut Frame) {
        let widget = QrCodeWidget::new(self.qr_code.clone()).colors(Colors::Inverted);
        let sim_area = Rect::new(0, 0, 50, 50);
        let size = widget.size(sim_area);

        let block_width = cmp::max(size.width as usize, self.passphrase.len() + 12) + 6;

        let block = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(size.height + 12),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area())[1];

        let block = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(block_width as u16),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(block)[1];

        let (title_block, mut qr_block, passphrase_block) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Fill(1),
                    Constraint::Length(3),
                ])
                .margin(3)
                .flex(Flex::SpaceBetween)
                .split(block);

            (chunks[0], chunks[1], chunks[2])
        };

        frame.render_widget(Clear, block);
        frame.render_widget(
            Block::new()
                .borders(Borders::all())
                .border_type(BorderType::Thick)
                .border_style(Style::new().green()),
            block,
        );
        frame.render_widget(
            Text::from(self.network_name.clone()).centered().bold(),
            title_block,
        );

        if (size.width as usize) < block_width {
            qr_block = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(size.width),
                    Constraint::Fill(1),
                ])
                .flex(Flex::SpaceBetween)
                .split(qr_block)[1];
        }

        frame.render_widget(widget, qr_block);

        let passphrase = Text::from(vec![
            Line::from(""),
            Line::from(vec![
                Span::from("Passphrase: "),
                Span::from(&self.passphrase).bold().bg(Color::DarkGray),
            ])
            .centered(),
        ]);
        frame.render_widget(passphrase, passphrase_block);
    }
}

/// iwd file names: the SSID verbatim when it is purely alphanumeric,
/// '-' or '_'; otherwise '=' followed by the hex of its bytes.
pub fn encode_ssid(ssid: &str) -> String {
    if !ssid.is_empty()
        && ssid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        ssid.to_string()
    } else {
        format!("={}", hex::encode(ssid.as_bytes()))
    }
}

/// Pull Passphrase= out of the [Security] group of a provisioning file
fn parse_passphrase(content: &str) -> Option<String> {
    let mut in_security = false;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_security = line == "[Security]";
            continue;
        }
        if in_security && let Some(value) = line.strip_prefix("Passphrase=") {
            return Some(value.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ssids_keep_their_name() {
        assert_eq!(encode_ssid("HomeWifi-5G"), "HomeWifi-5G");
        assert_eq!(encode_ssid("lab_42"), "lab_42");
    }

    #[test]
    fn special_ssids_are_hex_encoded() {
        assert_eq!(encode_ssid("My Cafe"), format!("={}", hex::encode("My Cafe")));
        assert!(encode_ssid("caf\u{e9}").starts_with('='));
        assert!(encode_ssid("").starts_with('='));
    }

    #[test]
    fn passphrase_is_read_from_the_security_group() {
        let content = "\
[Settings]
AutoConnect=true

[Security]
Passphrase=correct horse
PreSharedKey=deadbeef
";
        assert_eq!(parse_passphrase(content).as_deref(), Some("correct horse"));
    }

    #[test]
    fn passphrase_outside_security_group_is_ignored() {
        let content = "\
[Settings]
Passphrase=not this one
";
        assert_eq!(parse_passphrase(content), None);
    }
}
