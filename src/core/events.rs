//! Unified event handling system

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

use crate::core::state::StateChange;

/// All possible events in the system
#[derive(Debug, Clone)]
pub enum Event {
    // Input events
    Key(KeyEvent),
    Resize(u16, u16),

    /// Redraw tick so the clock and relative times stay current
    Tick,

    /// Forwarded from the state store after the poller applied a result
    StateChanged(StateChange),
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, tx)
    }

    /// Start all event source tasks
    pub fn spawn_sources(
        event_tx: mpsc::UnboundedSender<Event>,
        changes: broadcast::Receiver<StateChange>,
    ) {
        tokio::spawn(Self::terminal_events(event_tx.clone()));
        tokio::spawn(Self::tick_events(event_tx.clone(), Duration::from_millis(250)));
        tokio::spawn(Self::state_changes(event_tx, changes));
    }

    async fn terminal_events(tx: mpsc::UnboundedSender<Event>) {
        use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
        use futures::StreamExt;

        let mut reader = event::EventStream::new();
        while let Some(event_result) = reader.next().await {
            let event = match event_result {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!("terminal event stream failed: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    }

    async fn tick_events(tx: mpsc::UnboundedSender<Event>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if tx.send(Event::Tick).is_err() {
                break;
            }
        }
    }

    async fn state_changes(
        tx: mpsc::UnboundedSender<Event>,
        mut changes: broadcast::Receiver<StateChange>,
    ) {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    if tx.send(Event::StateChanged(change)).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "state change receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key binding helper
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        // Terminals disagree on whether shifted characters like '?' carry SHIFT.
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        event.code == self.key && modifiers == self.modifiers
    }
}

/// Standard key bindings
pub struct KeyBindings;

impl KeyBindings {
    pub fn quit() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('q'))
    }

    pub fn quit_alt() -> KeyBinding {
        KeyBinding::ctrl(KeyCode::Char('c'))
    }

    pub fn help() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('?'))
    }

    pub fn escape() -> KeyBinding {
        KeyBinding::new(KeyCode::Esc)
    }

    pub fn tab() -> KeyBinding {
        KeyBinding::new(KeyCode::Tab)
    }

    pub fn backtab() -> KeyBinding {
        KeyBinding {
            key: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn up() -> KeyBinding {
        KeyBinding::new(KeyCode::Up)
    }

    pub fn down() -> KeyBinding {
        KeyBinding::new(KeyCode::Down)
    }

    pub fn vim_up() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('k'))
    }

    pub fn vim_down() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('j'))
    }

    pub fn page_up() -> KeyBinding {
        KeyBinding::new(KeyCode::PageUp)
    }

    pub fn page_down() -> KeyBinding {
        KeyBinding::new(KeyCode::PageDown)
    }

    pub fn refresh() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('r'))
    }

    /// `1`..`4` jump straight to a section.
    pub fn section_index(event: &KeyEvent) -> Option<usize> {
        if event.modifiers != KeyModifiers::NONE {
            return None;
        }
        match event.code {
            KeyCode::Char(c @ '1'..='4') => Some(c as usize - '1' as usize),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_map_to_sections() {
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(KeyBindings::section_index(&key('1')), Some(0));
        assert_eq!(KeyBindings::section_index(&key('4')), Some(3));
        assert_eq!(KeyBindings::section_index(&key('5')), None);
        assert_eq!(
            KeyBindings::section_index(&KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn ctrl_c_is_distinct_from_c() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(KeyBindings::quit_alt().matches(&ctrl_c));
        assert!(!KeyBindings::quit().matches(&ctrl_c));
    }

    #[tokio::test]
    async fn forwards_state_changes() {
        let (mut handler, tx) = EventHandler::new();
        let (change_tx, change_rx) = broadcast::channel(4);
        tokio::spawn(EventHandler::state_changes(tx, change_rx));

        change_tx.send(StateChange::MetricsUpdated).unwrap();
        match handler.next().await {
            Some(Event::StateChanged(StateChange::MetricsUpdated)) => {}
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
