//! Section navigation sidebar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::core::state::{AppState, Section};
use crate::ui::theme::Theme;

pub struct Sidebar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for Sidebar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" DASHBOARD ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border)
            .style(Style::default().bg(self.theme.colors.bg_primary));

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, section) in Section::ALL.iter().enumerate() {
            let y = inner.y + (i as u16) * 2;
            if y >= inner.y + inner.height {
                break;
            }

            let active = *section == self.state.active_section;
            let style = if active {
                self.theme.styles.nav_item_active
            } else {
                self.theme.styles.nav_item
            };

            let row = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            };
            buf.set_style(row, style);

            let line = Line::from(vec![
                Span::styled(if active { "▸ " } else { "  " }, style),
                Span::styled(format!("{} ", i + 1), self.theme.styles.keybind_key),
                Span::styled(section.title(), style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
