use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};

use crate::iwd::Mode;

/// Mode switch popup (station <-> access point)
#[derive(Debug, Clone, Default)]
pub struct Reset {
    pub enable: bool,
    pub selected_mode: Mode,
}

impl Reset {
    pub fn toggle_selection(&mut self) {
        self.selected_mode = match self.selected_mode {
            Mode::Station => Mode::Ap,
            Mode::Ap => Mode::Station,
        };
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.enable {
            return;
        }

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(8),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area());

        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(40),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(popup_layout[1])[1];

        frame.render_widget(Clear, area);

        let selected = Style::default().bg(Color::DarkGray).fg(Color::White).bold();
        let unselected = Style::default();

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Station  ",
                if self.selected_mode == Mode::Station {
                    selected
                } else {
                    unselected
                },
            ))
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                "  Access Point  ",
                if self.selected_mode == Mode::Ap {
                    selected
                } else {
                    unselected
                },
            ))
            .centered(),
            Line::from(""),
            Line::from(vec![
                Span::from("↵").bold(),
                Span::from(" Apply  "),
                Span::from("j/k").bold(),
                Span::from(" Select  "),
                Span::from("Esc").bold(),
                Span::from(" Cancel"),
            ])
            .centered()
            .dim(),
        ];

        let popup = Paragraph::new(lines).block(
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .title(" Switch Mode ")
                .title_style(Style::default().bold().fg(Color::White))
                .border_style(Style::default().fg(Color::Green))
                .padding(Padding::horizontal(1)),
        );

        frame.render_widget(popup, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggles_between_the_two_modes() {
        let mut reset = Reset::default();
        assert_eq!(reset.selected_mode, Mode::Station);
        reset.toggle_selection();
        assert_eq!(reset.selected_mode, Mode::Ap);
        reset.toggle_selection();
        assert_eq!(reset.selected_mode, Mode::Station);
    }
}
