use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use tui_input::Input;

/// Passphrase popup answering an agent request. The network name comes
/// from the agent's RequestPassphrase call.
#[derive(Debug, Default)]
pub struct PskDialog {
    pub passphrase: Input,
    pub show_password: bool,
    pub network_name: Option<String>,
}

impl PskDialog {
    pub fn open(&mut self, network_name: String) {
        self.passphrase.reset();
        self.show_password = false;
        self.network_name = Some(network_name);
    }

    pub fn reset(&mut self) {
        self.passphrase.reset();
        self.show_password = false;
        self.network_name = None;
    }

    /// Empty passphrase: silent no-op, popup stays open. Otherwise the
    /// passphrase is handed back for the agent reply and the dialog
    /// closes.
    pub fn submit(&mut self) -> Option<String> {
        let passphrase = self.passphrase.value().to_string();
        if passphrase.is_empty() {
            return None;
        }

        self.reset();
        Some(passphrase)
    }

    pub fn render(&self, frame: &mut Frame) {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(9),
                Constraint::Fill(1),
            ])
            .flex(ratatui::layout::Flex::SpaceBetween)
            .split(frame.area());

        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(60),
                Constraint::Fill(1),
            ])
            .flex(ratatui::layout::Flex::SpaceBetween)
            .split(popup_layout[1])[1];

        frame.render_widget(Clear, area);

        let title = match &self.network_name {
            Some(name) => format!(" Passphrase for {name} "),
            None => " Passphrase ".to_string(),
        };

        frame.render_widget(
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .title(title)
                .title_style(Style::default().bold().fg(Color::White))
                .border_style(Style::default().fg(Color::Green))
                .padding(Padding::new(2, 2, 1, 0)),
            area,
        );

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Passphrase label
                Constraint::Length(1), // Passphrase input
                Constraint::Length(1), // spacer
                Constraint::Length(1), // visibility
                Constraint::Length(1), // hints
            ])
            .split(Block::new().padding(Padding::new(2, 2, 1, 0)).inner(area));

        frame.render_widget(
            Paragraph::new(Line::from(Span::raw("Passphrase").bold())),
            inner[0],
        );

        let passphrase_str = if self.show_password {
            self.passphrase.value().to_string()
        } else {
            "*".repeat(self.passphrase.value().len())
        };
        let passphrase_input = Paragraph::new(if passphrase_str.is_empty() {
            Line::from(Span::raw("Enter passphrase").dim())
        } else {
            Line::from(passphrase_str.clone())
        })
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(passphrase_input, inner[1]);

        let visibility = Paragraph::new(Line::from(vec![
            if self.show_password {
                Span::raw("󰈈 Visible")
            } else {
                Span::raw("󰈉 Hidden")
            },
            Span::raw("  (Tab to toggle)").dim(),
        ]));
        frame.render_widget(visibility, inner[3]);

        let hints = Paragraph::new(
            Line::from(vec![
                Span::raw("Enter").bold(),
                Span::raw(" Apply  "),
                Span::raw("Esc").bold(),
                Span::raw(" Cancel"),
            ])
            .centered(),
        )
        .dim();
        frame.render_widget(hints, inner[4]);

        let cursor_x = inner[1].x + self.passphrase.visual_cursor().min(passphrase_str.len()) as u16;
        frame.set_cursor_position((cursor_x, inner[1].y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_passphrase_keeps_the_dialog_open() {
        let mut dialog = PskDialog::default();
        dialog.open("CoffeeShop".into());
        assert_eq!(dialog.submit(), None);
        assert_eq!(dialog.network_name.as_deref(), Some("CoffeeShop"));
    }

    #[test]
    fn submit_hands_back_the_passphrase_once() {
        let mut dialog = PskDialog::default();
        dialog.open("CoffeeShop".into());
        dialog.passphrase = Input::new("hunter22".into());

        assert_eq!(dialog.submit(), Some("hunter22".to_string()));
        assert_eq!(dialog.network_name, None);
        assert_eq!(dialog.submit(), None);
    }

    #[test]
    fn open_resets_previous_state() {
        let mut dialog = PskDialog::default();
        dialog.open("First".into());
        dialog.passphrase = Input::new("left-over".into());
        dialog.show_password = true;

        dialog.open("Second".into());
        assert_eq!(dialog.passphrase.value(), "");
        assert!(!dialog.show_password);
        assert_eq!(dialog.network_name.as_deref(), Some("Second"));
    }
}
