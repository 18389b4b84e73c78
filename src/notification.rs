use anyhow::Result;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::Event;

/// Ticks a toast stays on screen
const NOTIFICATION_TTL: usize = 8;

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl Notification {
    pub fn send(
        message: String,
        level: NotificationLevel,
        sender: &UnboundedSender<Event>,
    ) -> Result<()> {
        sender.send(Event::Notification(Notification {
            message,
            level,
            ttl: NOTIFICATION_TTL,
        }))?;
        Ok(())
    }

    pub fn render(&self, index: usize, frame: &mut Frame) {
        let (color, title) = match self.level {
            NotificationLevel::Info => (Color::Green, "Info"),
            NotificationLevel::Warning => (Color::Yellow, "Warning"),
            NotificationLevel::Error => (Color::Red, "Error"),
        };

        let width = (self.message.len() as u16 + 6).clamp(20, 60);
        let height = 2 + self.message.len() as u16 / width.saturating_sub(4).max(1);

        let area = frame.area();
        let top = (index as u16) * (height + 2) + 1;
        if top + height + 2 > area.height {
            return;
        }

        let block = Rect {
            x: area.width.saturating_sub(width + 2),
            y: top,
            width: width.min(area.width),
            height: height + 2,
        };

        let popup = Paragraph::new(Text::from(self.message.as_str()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {title} "))
                    .title_style(Style::default().fg(color))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .padding(Padding::horizontal(1)),
            );

        frame.render_widget(Clear, block);
        frame.render_widget(popup, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_counts_down_to_removal() {
        let mut notifications = vec![
            Notification {
                message: "Scan requested".into(),
                level: NotificationLevel::Info,
                ttl: 2,
            },
            Notification {
                message: "Failed to connect to hidden network".into(),
                level: NotificationLevel::Error,
                ttl: 1,
            },
        ];

        // Same retain/decrement sequence App::tick runs
        for _ in 0..2 {
            notifications.retain(|n| n.ttl > 0);
            notifications.iter_mut().for_each(|n| n.ttl -= 1);
        }

        notifications.retain(|n| n.ttl > 0);
        assert!(notifications.is_empty());
    }
}
