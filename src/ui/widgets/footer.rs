//! Footer widget with keybindings

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::{AppState, Section};
use crate::ui::theme::Theme;

pub struct Footer<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for Footer<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }
        buf.set_style(area, self.theme.styles.footer);

        let bindings: Vec<(&str, &str)> = if self.state.show_help {
            vec![("Esc", "Close"), ("?", "Close")]
        } else {
            let mut b = vec![("1-4", "Section"), ("Tab", "Next")];
            if self.state.active_section == Section::Processes {
                b.push(("↑/↓", "Scroll"));
            }
            b.extend([("r", "Refresh"), ("?", "Help"), ("q", "Quit")]);
            b
        };

        let mut spans = Vec::new();
        for (i, (key, action)) in bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.styles.keybind));
            }
            spans.push(Span::styled(
                format!("[{}]", key),
                self.theme.styles.keybind_key,
            ));
            spans.push(Span::styled(
                format!(" {}", action),
                self.theme.styles.keybind,
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(2));

        // Backend address on the right
        let url = Span::styled(
            format!("{} ", self.state.base_url),
            self.theme.styles.keybind,
        );
        let url_width = url.width() as u16;
        if url_width + line.width() as u16 + 4 <= area.width {
            buf.set_span(
                area.x + area.width - url_width,
                area.y,
                &url,
                url_width,
            );
        }
    }
}
