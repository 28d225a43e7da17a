//! Layout management system

use ratatui::layout::{Constraint, Direction, Layout, Rect};

const SIDEBAR_WIDTH: u16 = 22;

/// Computed layout rects for the frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedLayout {
    pub header: Rect,
    pub footer: Rect,
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub overlay_area: Rect,
}

pub struct LayoutManager;

impl LayoutManager {
    /// Header, sidebar | content, footer. The sidebar is dropped on narrow terminals.
    pub fn compute(area: Rect) -> ComputedLayout {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let body = main_chunks[1];
        let (sidebar, content) = if body.width >= SIDEBAR_WIDTH * 3 {
            let body_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
                .split(body);
            (Some(body_chunks[0]), body_chunks[1])
        } else {
            (None, body)
        };

        ComputedLayout {
            header: main_chunks[0],
            footer: main_chunks[2],
            sidebar,
            content,
            overlay_area: centered_rect(60, 70, area),
        }
    }
}

/// Create a centered rect with given percentage width/height
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
