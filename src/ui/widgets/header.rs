//! Header widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::history::{Health, Resource};
use crate::core::state::AppState;
use crate::ui::theme::Theme;

pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.theme.styles.header);

        let separator = || Span::styled(" │ ", Style::default().fg(self.theme.colors.fg_muted));

        let mut spans = vec![Span::styled(
            " ◉ SYSTEM MONITOR ",
            Style::default()
                .fg(self.theme.colors.accent_primary)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(metrics) = &self.state.metrics {
            spans.push(separator());
            spans.push(Span::styled(
                metrics.system.hostname.clone(),
                Style::default().fg(self.theme.colors.fg_primary),
            ));

            spans.push(separator());
            spans.push(Span::styled(
                format!("CPU: {:.1}%", metrics.cpu.usage),
                self.theme
                    .health_style(Health::classify(Resource::Cpu, metrics.cpu.usage)),
            ));

            spans.push(separator());
            spans.push(Span::styled(
                format!("RAM: {:.1}%", metrics.memory.usage),
                self.theme
                    .health_style(Health::classify(Resource::Memory, metrics.memory.usage)),
            ));
        }

        let left_line = Line::from(spans);
        buf.set_line(area.x, area.y, &left_line, area.width);

        // Right side: last update time and connection indicator
        let connection = &self.state.connection;
        let (indicator, indicator_style) = if connection.connected {
            ("● Connected", self.theme.styles.connected)
        } else {
            ("○ Disconnected", self.theme.styles.disconnected)
        };
        let updated = format!(
            "Last updated: {}  ",
            connection.last_updated.format("%H:%M:%S")
        );

        let right_line = Line::from(vec![
            Span::styled(updated, Style::default().fg(self.theme.colors.fg_muted)),
            Span::styled(indicator, indicator_style),
            Span::raw(" "),
        ]);
        let right_width = right_line.width() as u16;
        let right_x = area.x + area.width.saturating_sub(right_width);
        buf.set_line(right_x, area.y, &right_line, right_width.min(area.width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SystemMetrics;
    use crate::core::state::Section;

    fn render(state: &AppState) -> String {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        Header::new(state, &state.theme).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_disconnected_after_failure() {
        let mut state = AppState::new(String::new(), Section::Overview, Theme::default());
        assert!(!render(&state).contains("Disconnected"));

        state.apply_metrics(1, Err::<SystemMetrics, _>("down"), chrono::Local::now());
        assert!(render(&state).contains("Disconnected"));
    }
}
