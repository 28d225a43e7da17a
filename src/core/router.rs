//! Maps application state to the section that should be drawn

use crate::core::state::{AppState, Section};

/// What the content area shows on the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// No metrics snapshot has arrived yet
    Loading,
    Overview,
    Performance,
    Processes,
    System,
}

/// Pure dispatch over (snapshot, selector). The process list never gates the
/// view; an empty list renders as an empty table.
pub fn route(state: &AppState) -> View {
    if state.metrics.is_none() {
        return View::Loading;
    }

    match state.active_section {
        Section::Overview => View::Overview,
        Section::Performance => View::Performance,
        Section::Processes => View::Processes,
        Section::System => View::System,
    }
}
