//! Main application orchestrator

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::sync::Arc;

use crate::api::HttpMetricsClient;
use crate::core::events::{Event, EventHandler, EventResult, KeyBindings};
use crate::core::poller::{PollIntervals, PollingCoordinator};
use crate::core::state::{AppState, Section, StateChange, StateStore};
use crate::ui::renderer::Renderer;
use crate::ui::theme::Theme;

/// Rows moved by PageUp/PageDown in the process table
const PAGE_SIZE: isize = 10;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: StateStore,
    client: Arc<HttpMetricsClient>,
    intervals: PollIntervals,
    poller: Option<PollingCoordinator>,
}

impl App {
    pub fn new(
        client: HttpMetricsClient,
        intervals: PollIntervals,
        section: Section,
        theme: Theme,
    ) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;

        let initial_state = AppState::new(client.base_url().to_string(), section, theme);

        Ok(Self {
            terminal,
            state: StateStore::new(initial_state),
            client: Arc::new(client),
            intervals,
            poller: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.setup_terminal()?;

        let (mut event_handler, event_tx) = EventHandler::new();
        EventHandler::spawn_sources(event_tx, self.state.subscribe());

        self.poller = Some(PollingCoordinator::start(
            self.client.clone(),
            self.state.clone(),
            self.intervals,
        ));

        let result = match self.render() {
            Ok(()) => self.event_loop(&mut event_handler).await,
            Err(e) => Err(e),
        };

        if let Some(mut poller) = self.poller.take() {
            poller.shutdown();
        }
        self.restore_terminal()?;
        result
    }

    fn setup_terminal(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide,
        )?;
        Ok(())
    }

    fn restore_terminal(&mut self) -> Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show,
        )?;
        Ok(())
    }

    async fn event_loop(&mut self, event_handler: &mut EventHandler) -> Result<()> {
        while let Some(event) = event_handler.next().await {
            match self.handle_event(event)? {
                EventResult::Continue => {}
                EventResult::Quit => break,
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<EventResult> {
        let result = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "terminal resized");
                EventResult::Continue
            }
            Event::Tick => EventResult::Continue,
            Event::StateChanged(change) => {
                tracing::trace!(?change, "state changed");
                EventResult::Continue
            }
        };

        if result == EventResult::Continue {
            self.render()?;
        }
        Ok(result)
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if KeyBindings::quit_alt().matches(&key) {
            return EventResult::Quit;
        }

        if self.state.read().show_help {
            if KeyBindings::escape().matches(&key) || KeyBindings::help().matches(&key) {
                self.toggle_help();
            } else if KeyBindings::quit().matches(&key) {
                return EventResult::Quit;
            }
            return EventResult::Continue;
        }

        dispatch_key(&self.state, self.poller.as_ref(), key)
    }

    fn toggle_help(&self) {
        self.state.update(|s| {
            s.show_help = !s.show_help;
            ((), Some(StateChange::HelpToggled))
        });
    }

    fn render(&mut self) -> Result<()> {
        let state = self.state.snapshot();
        self.terminal
            .draw(|frame| Renderer::render(frame, &state))?;
        Ok(())
    }
}

/// Dashboard key handling, split out so it can run without a terminal.
fn dispatch_key(
    store: &StateStore,
    poller: Option<&PollingCoordinator>,
    key: KeyEvent,
) -> EventResult {
    if KeyBindings::quit().matches(&key) {
        return EventResult::Quit;
    }

    if KeyBindings::help().matches(&key) {
        store.update(|s| {
            s.show_help = true;
            ((), Some(StateChange::HelpToggled))
        });
        return EventResult::Continue;
    }

    let target = if let Some(index) = KeyBindings::section_index(&key) {
        Section::from_index(index)
    } else if KeyBindings::tab().matches(&key) {
        Some(store.read().active_section.next())
    } else if KeyBindings::backtab().matches(&key) {
        Some(store.read().active_section.prev())
    } else {
        None
    };

    if let Some(section) = target {
        store.update(|s| {
            let changed = s.select_section(section);
            tracing::debug!(section = section.id(), changed, "section selected");
            ((), changed.then_some(StateChange::SectionChanged(section)))
        });
        return EventResult::Continue;
    }

    if KeyBindings::refresh().matches(&key) {
        if let Some(poller) = poller {
            poller.refresh_now();
        }
        return EventResult::Continue;
    }

    let delta = if KeyBindings::up().matches(&key) || KeyBindings::vim_up().matches(&key) {
        -1
    } else if KeyBindings::down().matches(&key) || KeyBindings::vim_down().matches(&key) {
        1
    } else if KeyBindings::page_up().matches(&key) {
        -PAGE_SIZE
    } else if KeyBindings::page_down().matches(&key) {
        PAGE_SIZE
    } else {
        0
    };

    if delta != 0 {
        store.update(|s| {
            if s.active_section == Section::Processes {
                s.scroll_processes(delta);
            }
            ((), None)
        });
    }

    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures::process;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store() -> StateStore {
        StateStore::new(AppState::new(
            String::new(),
            Section::Overview,
            Theme::default(),
        ))
    }

    #[test]
    fn digits_and_tab_switch_sections() {
        let store = store();
        let mut changes = store.subscribe();

        dispatch_key(&store, None, key(KeyCode::Char('3')));
        assert_eq!(store.read().active_section, Section::Processes);
        assert_eq!(
            changes.try_recv().ok(),
            Some(StateChange::SectionChanged(Section::Processes))
        );

        dispatch_key(&store, None, key(KeyCode::Tab));
        assert_eq!(store.read().active_section, Section::System);

        dispatch_key(&store, None, key(KeyCode::Tab));
        assert_eq!(store.read().active_section, Section::Overview);

        let backtab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        dispatch_key(&store, None, backtab);
        assert_eq!(store.read().active_section, Section::System);
    }

    #[test]
    fn reselecting_active_section_emits_nothing() {
        let store = store();
        let mut changes = store.subscribe();
        dispatch_key(&store, None, key(KeyCode::Char('1')));
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn scrolling_only_applies_to_process_section() {
        let store = store();
        store.update(|s| {
            let list = (1..=30).map(|pid| process(pid, "worker", 1.0)).collect();
            s.apply_processes::<()>(1, Ok(list));
            ((), None)
        });

        dispatch_key(&store, None, key(KeyCode::Down));
        assert_eq!(store.read().sections.processes.scroll_offset, 0);

        dispatch_key(&store, None, key(KeyCode::Char('3')));
        dispatch_key(&store, None, key(KeyCode::Char('j')));
        dispatch_key(&store, None, key(KeyCode::PageDown));
        assert_eq!(store.read().sections.processes.scroll_offset, 11);

        dispatch_key(&store, None, key(KeyCode::Up));
        assert_eq!(store.read().sections.processes.scroll_offset, 10);
    }

    #[test]
    fn quit_and_help() {
        let store = store();
        assert_eq!(
            dispatch_key(&store, None, key(KeyCode::Char('q'))),
            EventResult::Quit
        );
        dispatch_key(&store, None, key(KeyCode::Char('?')));
        assert!(store.read().show_help);
    }
}
