//! Placeholder shown until the first metrics snapshot arrives

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::state::AppState;
use crate::ui::theme::Theme;

pub struct Loading<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Loading<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for Loading<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        let mut lines = vec![
            Line::from(Span::styled(
                "Loading...",
                self.theme.styles.value.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Waiting for {}", self.state.base_url),
                self.theme.styles.muted,
            )),
        ];

        if !self.state.connection.connected {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Backend unreachable, retrying",
                self.theme.styles.disconnected,
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(rows[1], buf);
    }
}
