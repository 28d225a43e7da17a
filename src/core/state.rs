//! Application state with sequenced updates from the poller

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::api::{Process, SystemMetrics};
use crate::core::history::{OverviewHistory, PerformanceHistory};
use crate::ui::theme::Theme;

/// Navigable dashboard sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    Performance,
    Processes,
    System,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Self::Overview,
        Self::Performance,
        Self::Processes,
        Self::System,
    ];

    /// Parse a selector value; anything unrecognized selects the overview.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "overview" => Self::Overview,
            "performance" => Self::Performance,
            "processes" => Self::Processes,
            "system" | "system-info" => Self::System,
            _ => Self::Overview,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Performance => "performance",
            Self::Processes => "processes",
            Self::System => "system",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Performance => "Performance",
            Self::Processes => "Processes",
            Self::System => "System Info",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Performance => 1,
            Self::Processes => 2,
            Self::System => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which poll stream a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Metrics,
    Processes,
}

/// Binary reachability of the metrics endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionState {
    pub connected: bool,
    pub last_updated: chrono::DateTime<chrono::Local>,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            connected: true,
            last_updated: chrono::Local::now(),
        }
    }
}

/// Section-owned view state. Rebuilt whenever its section is activated.
#[derive(Debug, Clone, Default)]
pub struct SectionStates {
    pub overview: OverviewHistory,
    pub performance: PerformanceHistory,
    pub processes: ProcessListState,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessListState {
    pub scroll_offset: usize,
}

/// Last sequence number applied per stream
#[derive(Debug, Clone, Copy, Default)]
pub struct AppliedSequence {
    pub metrics: u64,
    pub processes: u64,
}

impl AppliedSequence {
    fn slot(&mut self, stream: Stream) -> &mut u64 {
        match stream {
            Stream::Metrics => &mut self.metrics,
            Stream::Processes => &mut self.processes,
        }
    }

    /// Accept `seq` only if it is newer than everything applied so far.
    pub fn accept(&mut self, stream: Stream, seq: u64) -> bool {
        let slot = self.slot(stream);
        if seq <= *slot {
            return false;
        }
        *slot = seq;
        true
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub metrics: Option<SystemMetrics>,
    pub processes: Vec<Process>,
    pub active_section: Section,
    pub connection: ConnectionState,
    pub sections: SectionStates,
    pub applied: AppliedSequence,
    pub show_help: bool,
    pub theme: Theme,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String, section: Section, theme: Theme) -> Self {
        Self {
            metrics: None,
            processes: Vec::new(),
            active_section: section,
            connection: ConnectionState::default(),
            sections: SectionStates::default(),
            applied: AppliedSequence::default(),
            show_help: false,
            theme,
            base_url,
        }
    }

    /// Switch sections, mounting fresh view state for the one being entered.
    pub fn select_section(&mut self, section: Section) -> bool {
        if section == self.active_section {
            return false;
        }
        match section {
            Section::Overview => self.sections.overview = OverviewHistory::new(),
            Section::Performance => self.sections.performance = PerformanceHistory::new(),
            Section::Processes => self.sections.processes = ProcessListState::default(),
            Section::System => {}
        }
        self.active_section = section;
        true
    }

    /// Apply a metrics fetch outcome. Returns false when the result was stale.
    pub fn apply_metrics<E>(
        &mut self,
        seq: u64,
        outcome: Result<SystemMetrics, E>,
        now: chrono::DateTime<chrono::Local>,
    ) -> bool {
        if !self.applied.accept(Stream::Metrics, seq) {
            return false;
        }

        match outcome {
            Ok(metrics) => {
                match self.active_section {
                    Section::Overview => self.sections.overview.record(&metrics),
                    Section::Performance => self.sections.performance.record(&metrics, now),
                    Section::Processes | Section::System => {}
                }
                self.metrics = Some(metrics);
                self.connection.connected = true;
                self.connection.last_updated = now;
            }
            Err(_) => {
                self.connection.connected = false;
            }
        }
        true
    }

    /// Apply a process-list fetch outcome. Failures keep the last good list.
    pub fn apply_processes<E>(&mut self, seq: u64, outcome: Result<Vec<Process>, E>) -> bool {
        if !self.applied.accept(Stream::Processes, seq) {
            return false;
        }

        if let Ok(processes) = outcome {
            let max_offset = processes.len().saturating_sub(1);
            let list = &mut self.sections.processes;
            list.scroll_offset = list.scroll_offset.min(max_offset);
            self.processes = processes;
        }
        true
    }

    pub fn scroll_processes(&mut self, delta: isize) {
        let max_offset = self.processes.len().saturating_sub(1);
        let list = &mut self.sections.processes;
        list.scroll_offset = list
            .scroll_offset
            .saturating_add_signed(delta)
            .min(max_offset);
    }
}

/// Reactive state changes via broadcast channel
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    MetricsUpdated,
    MetricsFailed,
    ProcessesUpdated,
    SectionChanged(Section),
    HelpToggled,
}

/// Thread-safe state store
pub struct StateStore {
    state: Arc<RwLock<AppState>>,
    change_tx: broadcast::Sender<StateChange>,
}

impl StateStore {
    pub fn new(initial: AppState) -> Self {
        let (change_tx, _) = broadcast::channel(256);
        Self {
            state: Arc::new(RwLock::new(initial)),
            change_tx,
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.change_tx.subscribe()
    }

    /// Atomic state mutation with change notification
    pub fn update<F, R>(&self, mutator: F) -> R
    where
        F: FnOnce(&mut AppState) -> (R, Option<StateChange>),
    {
        let mut state = self.state.write();
        let (result, change) = mutator(&mut state);
        if let Some(change) = change {
            let _ = self.change_tx.send(change);
        }
        result
    }

    /// Read current state
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, AppState> {
        self.state.read()
    }

    /// Get a clone of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            change_tx: self.change_tx.clone(),
        }
    }
}
