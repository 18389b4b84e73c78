use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use tui_input::Input;

/// SSID entry popup for connecting to a network that does not
/// broadcast its name. The daemon takes the SSID as the only argument;
/// a passphrase, if required, is requested through the agent.
#[derive(Debug, Default)]
pub struct HiddenSsidDialog {
    pub ssid: Input,
}

impl HiddenSsidDialog {
    pub fn reset(&mut self) {
        self.ssid.reset();
    }

    /// Validate and consume the input. An empty SSID is a silent
    /// no-op: no call is made and the popup stays open. A non-empty
    /// SSID is returned for dispatch and the dialog resets, closing
    /// the popup regardless of what the call will do.
    pub fn submit(&mut self) -> Option<String> {
        let ssid = self.ssid.value().to_string();
        if ssid.is_empty() {
            return None;
        }

        self.reset();
        Some(ssid)
    }

    pub fn render(&self, frame: &mut Frame) {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(8),
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

        frame.render_widget(
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .title(" Connect to Hidden Network ")
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
                Constraint::Length(1), // spacer
                Constraint::Length(1), // hints
            ])
            .split(Block::new().padding(Padding::new(2, 2, 1, 0)).inner(area));

        let ssid_label = Paragraph::new(Line::from(vec![
            Span::raw("SSID").bold(),
            Span::raw(" *").fg(Color::Green),
        ]));
        frame.render_widget(ssid_label, inner[0]);

        let ssid_str = self.ssid.value().to_string();
        let ssid_input = Paragraph::new(if ssid_str.is_empty() {
            Line::from(Span::raw("Network name").dim())
        } else {
            Line::from(ssid_str.clone())
        })
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(ssid_input, inner[1]);

        let hints = Paragraph::new(
            Line::from(vec![
                Span::raw("Enter").bold(),
                Span::raw(" Connect  "),
                Span::raw("Esc").bold(),
                Span::raw(" Cancel"),
            ])
            .centered(),
        )
        .dim();
        frame.render_widget(hints, inner[3]);

        let cursor_x = inner[1].x + self.ssid.visual_cursor().min(ssid_str.len()) as u16;
        frame.set_cursor_position((cursor_x, inner[1].y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ssid_is_a_silent_no_op() {
        let mut dialog = HiddenSsidDialog::default();
        assert_eq!(dialog.submit(), None);
        // Popup stays open with its state untouched
        assert_eq!(dialog.ssid.value(), "");
        assert_eq!(dialog.submit(), None);
    }

    #[test]
    fn non_empty_ssid_yields_exactly_one_request_and_closes() {
        let mut dialog = HiddenSsidDialog {
            ssid: Input::new("MyHiddenSSID".into()),
        };

        assert_eq!(dialog.submit(), Some("MyHiddenSSID".to_string()));
        // Dialog is closed; a second submit must not produce a call
        assert_eq!(dialog.ssid.value(), "");
        assert_eq!(dialog.submit(), None);
    }

    #[test]
    fn repeated_open_close_cycles_leave_no_residue() {
        let mut dialog = HiddenSsidDialog::default();
        for i in 0..100 {
            assert_eq!(dialog.ssid.value(), "");
            dialog.ssid = Input::new(format!("network-{i}"));
            assert_eq!(dialog.submit(), Some(format!("network-{i}")));
        }
    }

    #[test]
    fn concurrent_dialogs_hold_independent_state() {
        let mut first = HiddenSsidDialog {
            ssid: Input::new("Attic".into()),
        };
        let mut second = HiddenSsidDialog {
            ssid: Input::new("Basement".into()),
        };

        assert_eq!(first.submit(), Some("Attic".to_string()));
        assert_eq!(second.ssid.value(), "Basement");
        assert_eq!(second.submit(), Some("Basement".to_string()));
    }
}
