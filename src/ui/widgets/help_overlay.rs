//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::ui::theme::Theme;

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(" Sysboard Help ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border_focused)
            .style(Style::default().bg(self.theme.colors.bg_secondary));

        let inner = block.inner(area);
        block.render(area, buf);

        let keybindings = [
            ("General", vec![
                ("q", "Quit"),
                ("?", "Toggle help"),
                ("r", "Fetch metrics and processes now"),
            ]),
            ("Sections", vec![
                ("1", "Overview"),
                ("2", "Performance"),
                ("3", "Processes"),
                ("4", "System Info"),
                ("Tab", "Next section"),
                ("S-Tab", "Previous section"),
            ]),
            ("Processes", vec![
                ("↑/k", "Scroll up"),
                ("↓/j", "Scroll down"),
                ("PgUp/PgDn", "Scroll a page"),
            ]),
        ];

        let mut y = inner.y;

        for (section, bindings) in &keybindings {
            if y >= inner.y + inner.height {
                break;
            }

            let header = Line::from(vec![Span::styled(
                format!("─── {} ", section),
                Style::default()
                    .fg(self.theme.colors.accent_primary)
                    .add_modifier(Modifier::BOLD),
            )]);
            buf.set_line(inner.x + 1, y, &header, inner.width.saturating_sub(2));
            y += 1;

            for (key, desc) in bindings {
                if y >= inner.y + inner.height {
                    break;
                }

                let line = Line::from(vec![
                    Span::styled(format!("  {:>10}  ", key), self.theme.styles.keybind_key),
                    Span::styled(*desc, self.theme.styles.keybind),
                ]);
                buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(2));
                y += 1;
            }

            y += 1;
        }

        let footer_text = " Press Esc or ? to close ";
        let footer_width = (footer_text.len() as u16).min(area.width);
        let footer = Span::styled(footer_text, Style::default().fg(self.theme.colors.fg_muted));
        buf.set_span(
            area.x + (area.width - footer_width) / 2,
            area.y + area.height.saturating_sub(1),
            &footer,
            footer_width,
        );
    }
}
