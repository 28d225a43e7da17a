//! Processes section

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::core::state::AppState;
use crate::ui::format::{format_optional_percent, truncate_to_width};
use crate::ui::theme::Theme;

const NAME_WIDTH: usize = 32;

pub struct ProcessesSection<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ProcessesSection<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for ProcessesSection<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let processes = &self.state.processes;
        let offset = self.state.sections.processes.scroll_offset;

        let title = if processes.is_empty() {
            " Top Processes by CPU Usage ".to_string()
        } else {
            format!(
                " Top Processes by CPU Usage ({}/{}) ",
                (offset + 1).min(processes.len()),
                processes.len()
            )
        };

        let block = Block::default()
            .title(Span::styled(title, self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border_focused)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        let inner = block.inner(area);
        block.render(area, buf);

        if processes.is_empty() {
            Paragraph::new("No processes data available")
                .style(self.theme.styles.muted)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let header = Row::new(["PID", "Name", "CPU", "Memory", "Status"])
            .style(self.theme.styles.label)
            .bottom_margin(1);

        let visible = (inner.height as usize).saturating_sub(2);
        let rows: Vec<Row> = processes
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, p)| {
                let style = if i == offset {
                    self.theme.styles.list_item_selected
                } else {
                    self.theme.styles.list_item
                };
                Row::new(vec![
                    Cell::from(p.pid.to_string()),
                    Cell::from(truncate_to_width(p.display_name(), NAME_WIDTH)),
                    Cell::from(format_optional_percent(p.cpu_percent))
                        .style(Style::default().fg(self.theme.colors.error)),
                    Cell::from(format_optional_percent(p.memory_percent))
                        .style(Style::default().fg(self.theme.colors.success)),
                    Cell::from(p.display_status().to_string()).style(self.theme.styles.muted),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
        ];

        Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .render(inner, buf);
    }
}
