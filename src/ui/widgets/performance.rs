//! Performance section - CPU trend chart, memory split and load average

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::api::SystemMetrics;
use crate::core::history::{PerformanceHistory, PERFORMANCE_CAPACITY};
use crate::core::state::AppState;
use crate::ui::format::{bar, format_gb, format_percent};
use crate::ui::theme::Theme;

pub struct PerformanceSection<'a> {
    metrics: &'a SystemMetrics,
    history: &'a PerformanceHistory,
    theme: &'a Theme,
}

impl<'a> PerformanceSection<'a> {
    pub fn new(state: &'a AppState, metrics: &'a SystemMetrics, theme: &'a Theme) -> Self {
        Self {
            metrics,
            history: &state.sections.performance,
            theme,
        }
    }

    fn block(&self, title: &str) -> Block<'static> {
        Block::default()
            .title(Span::styled(format!(" {} ", title), self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary))
    }

    fn render_cpu_chart(&self, area: Rect, buf: &mut Buffer) {
        let block = self.block("CPU Usage History");
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.cpu.is_empty() {
            Paragraph::new("Collecting samples…")
                .style(self.theme.styles.muted)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let points: Vec<(f64, f64)> = self
            .history
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i as f64, v))
            .collect();

        let first = self.history.cpu.iter().next().map(|s| s.label.clone());
        let last = self.history.cpu.latest().map(|s| s.label.clone());
        let x_labels: Vec<Span> = [first, last]
            .into_iter()
            .flatten()
            .map(|l| Span::styled(l, self.theme.styles.label))
            .collect();

        let dataset = Dataset::default()
            .name("CPU %")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.theme.styles.chart_line)
            .data(&points);

        Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .style(self.theme.styles.muted)
                    .bounds([0.0, (PERFORMANCE_CAPACITY - 1) as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(self.theme.styles.muted)
                    .bounds([0.0, 100.0])
                    .labels(vec![
                        Span::styled("0", self.theme.styles.label),
                        Span::styled("50", self.theme.styles.label),
                        Span::styled("100", self.theme.styles.label),
                    ]),
            )
            .render(inner, buf);
    }

    fn render_memory(&self, area: Rect, buf: &mut Buffer) {
        let block = self.block("Memory Distribution");
        let inner = block.inner(area);
        block.render(area, buf);

        let mem = &self.metrics.memory;
        let bar_width = (inner.width as usize).saturating_sub(14).min(30);
        let lines = vec![
            kv_line("Used", format_gb(mem.used), self.theme),
            kv_line("Available", format_gb(mem.available), self.theme),
            kv_line("Total", format_gb(mem.total), self.theme),
            Line::from(vec![
                Span::styled(format!("{:<11}", "Usage"), self.theme.styles.label),
                Span::styled(bar(mem.usage, bar_width), self.theme.styles.sparkline),
                Span::styled(format!(" {}", format_percent(mem.usage)), self.theme.styles.value),
            ]),
            Line::default(),
            kv_line(
                "Swap",
                format!(
                    "{} / {} ({})",
                    format_gb(mem.swap.used),
                    format_gb(mem.swap.total),
                    format_percent(mem.swap.usage)
                ),
                self.theme,
            ),
        ];

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_load_average(&self, area: Rect, buf: &mut Buffer) {
        let block = self.block("Load Average");
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(inner);

        let windows = ["1 min", "5 min", "15 min"];
        for ((value, label), column) in self
            .metrics
            .system
            .load_average
            .iter()
            .zip(windows)
            .zip(columns.iter())
        {
            let lines = vec![
                Line::from(Span::styled(format!("{:.2}", value), self.theme.styles.value)),
                Line::from(Span::styled(label, self.theme.styles.label)),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(*column, buf);
        }
    }
}

fn kv_line(key: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", key), theme.styles.label),
        Span::styled(value, theme.styles.value),
    ])
}

impl<'a> Widget for PerformanceSection<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);

        self.render_cpu_chart(top[0], buf);
        self.render_memory(top[1], buf);
        self.render_load_average(rows[1], buf);
    }
}
