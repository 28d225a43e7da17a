//! System information section

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::api::SystemMetrics;
use crate::ui::format::{format_count, truncate_to_width};
use crate::ui::theme::Theme;

const PROCESSOR_WIDTH: usize = 50;

pub struct SystemInfoSection<'a> {
    metrics: &'a SystemMetrics,
    theme: &'a Theme,
}

impl<'a> SystemInfoSection<'a> {
    pub fn new(metrics: &'a SystemMetrics, theme: &'a Theme) -> Self {
        Self { metrics, theme }
    }

    fn items(&self) -> Vec<(&'static str, String)> {
        let sys = &self.metrics.system;
        vec![
            ("Operating System", sys.os.clone()),
            ("Architecture", sys.architecture.clone()),
            ("Processor", truncate_to_width(&sys.processor, PROCESSOR_WIDTH)),
            ("Hostname", sys.hostname.clone()),
            ("Uptime", sys.uptime.clone()),
            (
                "Load Average",
                sys.load_average
                    .iter()
                    .map(|l| format!("{:.2}", l))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            ("Running Processes", format_count(u64::from(sys.processes))),
            ("Boot Time", sys.boot_time.clone()),
        ]
    }
}

impl<'a> Widget for SystemInfoSection<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" System Information ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        let mut lines = Vec::new();
        for (label, value) in self.items() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", label), self.theme.styles.label),
                Span::styled(value, self.theme.styles.value),
            ]));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
