//! Overview section - one card per resource with gauge and sparkline

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Sparkline, Widget},
};

use crate::api::SystemMetrics;
use crate::core::history::{Health, OverviewHistory, Resource, RollingBuffer, Trend};
use crate::core::state::AppState;
use crate::ui::format::{format_bytes, format_count, format_gb};
use crate::ui::theme::Theme;

pub struct OverviewSection<'a> {
    metrics: &'a SystemMetrics,
    history: &'a OverviewHistory,
    theme: &'a Theme,
}

impl<'a> OverviewSection<'a> {
    /// Only constructed once a snapshot exists; the router guarantees it.
    pub fn new(state: &'a AppState, metrics: &'a SystemMetrics, theme: &'a Theme) -> Self {
        Self {
            metrics,
            history: &state.sections.overview,
            theme,
        }
    }
}

impl<'a> Widget for OverviewSection<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Four across on wide terminals, otherwise a 2x2 grid.
        let cells: Vec<Rect> = if area.width >= 140 {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 4); 4])
                .split(area)
                .to_vec()
        } else {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Ratio(1, 2); 2])
                .split(area);
            rows.iter()
                .flat_map(|row| {
                    Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Ratio(1, 2); 2])
                        .split(*row)
                        .to_vec()
                })
                .collect()
        };

        let m = self.metrics;

        UsageCard {
            title: "CPU Usage",
            resource: Resource::Cpu,
            percent: m.cpu.usage,
            history: &self.history.cpu,
            details: vec![
                format!("{} cores", m.cpu.count),
                format!("{:.0} MHz", m.cpu.frequency.current),
            ],
            theme: self.theme,
        }
        .render(cells[0], buf);

        UsageCard {
            title: "Memory Usage",
            resource: Resource::Memory,
            percent: m.memory.usage,
            history: &self.history.memory,
            details: vec![
                format!("{} / {}", format_gb(m.memory.used), format_gb(m.memory.total)),
                format!("Available: {}", format_gb(m.memory.available)),
            ],
            theme: self.theme,
        }
        .render(cells[1], buf);

        UsageCard {
            title: "Disk Usage",
            resource: Resource::Disk,
            percent: m.disk.usage,
            history: &self.history.disk,
            details: vec![
                format!("Free: {}", format_gb(m.disk.free)),
                format!("Total: {}", format_gb(m.disk.total)),
            ],
            theme: self.theme,
        }
        .render(cells[2], buf);

        NetworkCard {
            metrics: m,
            history: self.history,
            theme: self.theme,
        }
        .render(cells[3], buf);
    }
}

/// Write one line at `row` inside `rect`, skipping rows the rect does not have.
fn put_line(buf: &mut Buffer, rect: Rect, row: u16, line: &Line) {
    if row < rect.height && rect.width > 1 {
        buf.set_line(rect.x + 1, rect.y + row, line, rect.width - 1);
    }
}

fn card_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme.styles.panel_title))
        .borders(Borders::ALL)
        .border_style(theme.styles.panel_border)
        .style(Style::default().bg(theme.colors.bg_primary))
}

struct UsageCard<'a> {
    title: &'a str,
    resource: Resource,
    percent: f64,
    history: &'a RollingBuffer<f64>,
    details: Vec<String>,
    theme: &'a Theme,
}

impl<'a> Widget for UsageCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(self.title, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let health = Health::classify(self.resource, self.percent);
        let health_style = self.theme.health_style(health);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // value + health
                Constraint::Length(1), // gauge
                Constraint::Min(1),    // sparkline
                Constraint::Length(self.details.len() as u16),
            ])
            .split(inner);

        let headline = Line::from(vec![
            Span::styled(format!("{:.1}%", self.percent), self.theme.styles.value),
            Span::raw("  "),
            Span::styled(health.label(), health_style),
        ]);
        put_line(buf, rows[0], 0, &headline);

        Gauge::default()
            .gauge_style(health_style.bg(self.theme.colors.bg_secondary))
            .ratio((self.percent / 100.0).clamp(0.0, 1.0))
            .label("")
            .render(rows[1], buf);

        let data: Vec<u64> = self.history.iter().map(|v| v.round() as u64).collect();
        Sparkline::default()
            .data(&data)
            .max(100)
            .style(self.theme.styles.sparkline)
            .render(rows[2], buf);

        for (i, detail) in self.details.iter().take(rows[3].height as usize).enumerate() {
            let line = Line::from(vec![
                Span::styled("• ", self.theme.styles.muted),
                Span::styled(detail.as_str(), self.theme.styles.list_item),
            ]);
            put_line(buf, rows[3], i as u16, &line);
        }
    }
}

struct NetworkCard<'a> {
    metrics: &'a SystemMetrics,
    history: &'a OverviewHistory,
    theme: &'a Theme,
}

impl<'a> NetworkCard<'a> {
    fn trend_span(&self, trend: Trend) -> Span<'static> {
        let style = match trend {
            Trend::Up => self.theme.styles.trend_up,
            Trend::Down => self.theme.styles.trend_down,
            Trend::Stable => self.theme.styles.muted,
        };
        Span::styled(trend.arrow(), style)
    }
}

impl<'a> Widget for NetworkCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block("Network", self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let net = &self.metrics.network;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let sent = Line::from(vec![
            Span::styled("↑ ", self.theme.styles.label),
            Span::styled(format_bytes(net.bytes_sent), self.theme.styles.value),
            Span::raw(" "),
            self.trend_span(self.history.net_sent.trend()),
        ]);
        put_line(buf, rows[0], 0, &sent);

        let recv = Line::from(vec![
            Span::styled("↓ ", self.theme.styles.label),
            Span::styled(format_bytes(net.bytes_recv), self.theme.styles.value),
            Span::raw(" "),
            self.trend_span(self.history.net_recv.trend()),
        ]);
        put_line(buf, rows[1], 0, &recv);

        // Counters are cumulative, so chart growth within the window.
        let base = self.history.net_recv.iter().copied().min().unwrap_or(0);
        let data: Vec<u64> = self
            .history
            .net_recv
            .iter()
            .map(|v| v.saturating_sub(base))
            .collect();
        Sparkline::default()
            .data(&data)
            .style(self.theme.styles.sparkline)
            .render(rows[2], buf);

        let packets = Line::from(Span::styled(
            format!(
                "Packets: {}/{}",
                format_count(net.packets_sent),
                format_count(net.packets_recv)
            ),
            self.theme.styles.list_item,
        ));
        put_line(buf, rows[3], 0, &packets);
    }
}
