//! Main UI renderer

use ratatui::{
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::core::router::{route, View};
use crate::core::state::AppState;
use crate::ui::layout::LayoutManager;
use crate::ui::widgets::*;

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let theme = &state.theme;

        frame.render_widget(
            Block::default().style(Style::default().bg(theme.colors.bg_primary)),
            area,
        );

        // Tiny terminals get a hint instead of a broken frame
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            frame.render_widget(
                Paragraph::new("Terminal too small").style(theme.styles.muted),
                area,
            );
            return;
        }

        let layout = LayoutManager::compute(area);

        frame.render_widget(Header::new(state, theme), layout.header);
        frame.render_widget(Footer::new(state, theme), layout.footer);

        if let Some(sidebar_area) = layout.sidebar {
            frame.render_widget(Sidebar::new(state, theme), sidebar_area);
        }

        let content = layout.content;
        match (route(state), state.metrics.as_ref()) {
            (View::Loading, _) | (_, None) => {
                frame.render_widget(Loading::new(state, theme), content);
            }
            (View::Overview, Some(metrics)) => {
                frame.render_widget(OverviewSection::new(state, metrics, theme), content);
            }
            (View::Performance, Some(metrics)) => {
                frame.render_widget(PerformanceSection::new(state, metrics, theme), content);
            }
            (View::Processes, Some(_)) => {
                frame.render_widget(ProcessesSection::new(state, theme), content);
            }
            (View::System, Some(metrics)) => {
                frame.render_widget(SystemInfoSection::new(metrics, theme), content);
            }
        }

        if state.show_help {
            frame.render_widget(HelpOverlay::new(theme), layout.overlay_area);
        }
    }
}
