//! Polling coordinator - fixed-rate metrics and process fetches

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::MetricsSource;
use crate::core::state::{StateChange, StateStore, Stream};

/// Cadence of the two poll streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub metrics: Duration,
    pub processes: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            metrics: Duration::from_millis(2000),
            processes: Duration::from_millis(5000),
        }
    }
}

/// Shared between the ticker tasks and every fetch they spawn.
#[derive(Clone)]
struct PollContext {
    source: Arc<dyn MetricsSource>,
    store: StateStore,
    active: Arc<AtomicBool>,
    metrics_refresh: Arc<Notify>,
    processes_refresh: Arc<Notify>,
    metrics_seq: Arc<AtomicU64>,
    processes_seq: Arc<AtomicU64>,
}

impl PollContext {
    fn next_seq(&self, stream: Stream) -> u64 {
        let counter = match stream {
            Stream::Metrics => &self.metrics_seq,
            Stream::Processes => &self.processes_seq,
        };
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn refresh_signal(&self, stream: Stream) -> &Notify {
        match stream {
            Stream::Metrics => &self.metrics_refresh,
            Stream::Processes => &self.processes_refresh,
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Owns the metrics and process poll loops for the lifetime of the dashboard.
///
/// Each tick spawns its fetch and tags it with a per-stream sequence number, so
/// a slow response can overlap the next tick without rolling state backwards:
/// whichever result carries an older number than the last applied one is dropped.
pub struct PollingCoordinator {
    tickers: Vec<JoinHandle<()>>,
    ctx: PollContext,
}

impl PollingCoordinator {
    /// Issue an immediate fetch on both streams and keep polling until shutdown.
    pub fn start(source: Arc<dyn MetricsSource>, store: StateStore, intervals: PollIntervals) -> Self {
        let ctx = PollContext {
            source,
            store,
            active: Arc::new(AtomicBool::new(true)),
            metrics_refresh: Arc::new(Notify::new()),
            processes_refresh: Arc::new(Notify::new()),
            metrics_seq: Arc::new(AtomicU64::new(0)),
            processes_seq: Arc::new(AtomicU64::new(0)),
        };

        tracing::info!(
            metrics_ms = intervals.metrics.as_millis() as u64,
            processes_ms = intervals.processes.as_millis() as u64,
            "starting poll loops"
        );

        let tickers = vec![
            tokio::spawn(run_stream(Stream::Metrics, intervals.metrics, ctx.clone())),
            tokio::spawn(run_stream(
                Stream::Processes,
                intervals.processes,
                ctx.clone(),
            )),
        ];

        Self { tickers, ctx }
    }

    /// Fetch both streams now, outside the regular cadence.
    ///
    /// A ticker that is not waiting when this is called picks the request up on
    /// its next pass through the loop.
    pub fn refresh_now(&self) {
        self.ctx.metrics_refresh.notify_one();
        self.ctx.processes_refresh.notify_one();
    }

    /// Stop both schedules. Fetches already in flight finish but are not applied.
    pub fn shutdown(&mut self) {
        if !self.ctx.active.swap(false, Ordering::SeqCst) {
            return;
        }
        for ticker in self.tickers.drain(..) {
            ticker.abort();
        }
        tracing::info!("poll loops stopped");
    }
}

impl Drop for PollingCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_stream(stream: Stream, period: Duration, ctx: PollContext) {
    // The first tick completes immediately.
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = ctx.refresh_signal(stream).notified() => {
                tracing::debug!(?stream, "manual refresh");
            }
        }

        if !ctx.is_active() {
            break;
        }

        let seq = ctx.next_seq(stream);
        tokio::spawn(fetch_and_apply(stream, seq, ctx.clone()));
    }
}

async fn fetch_and_apply(stream: Stream, seq: u64, ctx: PollContext) {
    match stream {
        Stream::Metrics => {
            let outcome = ctx.source.fetch_metrics().await;
            if let Err(e) = &outcome {
                tracing::warn!(seq, error = %e, "metrics fetch failed");
            }

            let succeeded = outcome.is_ok();
            let applied = ctx.store.update(|s| {
                if !ctx.is_active() {
                    return (false, None);
                }
                let applied = s.apply_metrics(seq, outcome, chrono::Local::now());
                let change = match (applied, succeeded) {
                    (false, _) => None,
                    (true, true) => Some(StateChange::MetricsUpdated),
                    (true, false) => Some(StateChange::MetricsFailed),
                };
                (applied, change)
            });

            if !applied {
                tracing::debug!(seq, "dropped stale or late metrics response");
            }
        }
        Stream::Processes => {
            let outcome = ctx.source.fetch_processes().await;
            let succeeded = match &outcome {
                Ok(list) => {
                    tracing::trace!(seq, count = list.len(), "process list fetched");
                    true
                }
                Err(e) => {
                    tracing::warn!(seq, error = %e, "process fetch failed, keeping last list");
                    false
                }
            };

            let applied = ctx.store.update(|s| {
                if !ctx.is_active() {
                    return (false, None);
                }
                let applied = s.apply_processes(seq, outcome);
                let change = (applied && succeeded).then_some(StateChange::ProcessesUpdated);
                (applied, change)
            });

            if !applied {
                tracing::debug!(seq, "dropped stale or late process response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures::{metrics_with_cpu, process};
    use crate::api::{FetchError, MockMetricsSource, Process, SystemMetrics};
    use crate::core::history::{Health, Resource};
    use crate::core::state::{AppState, Section};
    use crate::ui::theme::Theme;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    fn store() -> StateStore {
        StateStore::new(AppState::new(
            "http://test".to_string(),
            Section::Overview,
            Theme::default(),
        ))
    }

    fn unavailable(endpoint: &str) -> FetchError {
        FetchError::Status {
            endpoint: endpoint.to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns scripted CPU values in order, repeating the last one, and counts calls.
    struct ScriptedSource {
        cpu: Vec<f64>,
        metrics_calls: AtomicUsize,
        process_calls: AtomicUsize,
        latency: Duration,
    }

    impl ScriptedSource {
        fn new(cpu: Vec<f64>) -> Self {
            Self {
                cpu,
                metrics_calls: AtomicUsize::new(0),
                process_calls: AtomicUsize::new(0),
                latency: Duration::ZERO,
            }
        }

        fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }
    }

    #[async_trait]
    impl MetricsSource for ScriptedSource {
        async fn fetch_metrics(&self) -> Result<SystemMetrics, FetchError> {
            let call = self.metrics_calls.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let cpu = self.cpu[call.min(self.cpu.len() - 1)];
            Ok(metrics_with_cpu(cpu))
        }

        async fn fetch_processes(&self) -> Result<Vec<Process>, FetchError> {
            let call = self.process_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![process(call as u32 + 1, "worker", 1.0)])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_both_streams_on_independent_cadence() {
        let source = Arc::new(ScriptedSource::new(vec![1.0]));
        let store = store();
        let _poller = PollingCoordinator::start(source.clone(), store.clone(), PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(10_500)).await;

        // t = 0, 2, 4, 6, 8, 10 s and t = 0, 5, 10 s
        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 6);
        assert_eq!(source.process_calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.read().processes[0].pid, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cpu_history_after_three_ticks() {
        let source = Arc::new(ScriptedSource::new(vec![10.0, 55.0, 92.0]));
        let store = store();
        let _poller = PollingCoordinator::start(source, store.clone(), PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(4_500)).await;

        let state = store.read();
        assert_eq!(state.sections.overview.cpu.to_vec(), vec![10.0, 55.0, 92.0]);
        let latest = state.metrics.as_ref().unwrap().cpu.usage;
        assert_eq!(Health::classify(Resource::Cpu, latest).label(), "High");
        assert!(state.connection.connected);
    }

    #[tokio::test(start_paused = true)]
    async fn connection_flips_with_metrics_outcome() {
        let mut mock = MockMetricsSource::new();
        let mut call = 0;
        mock.expect_fetch_metrics().returning(move || {
            call += 1;
            if call == 1 {
                Err(unavailable("metrics"))
            } else {
                Ok(metrics_with_cpu(20.0))
            }
        });
        mock.expect_fetch_processes()
            .returning(|| Err(unavailable("processes")));

        let store = store();
        let _poller = PollingCoordinator::start(Arc::new(mock), store.clone(), PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!store.read().connection.connected);
        assert!(store.read().metrics.is_none());

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        let state = store.read();
        assert!(state.connection.connected);
        assert!(state.processes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn process_failure_keeps_last_good_list() {
        let mut mock = MockMetricsSource::new();
        mock.expect_fetch_metrics()
            .returning(|| Ok(metrics_with_cpu(5.0)));
        let mut call = 0;
        mock.expect_fetch_processes().returning(move || {
            call += 1;
            if call == 1 {
                Ok(vec![process(10, "postgres", 3.5)])
            } else {
                Err(unavailable("processes"))
            }
        });

        let store = store();
        let _poller = PollingCoordinator::start(Arc::new(mock), store.clone(), PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        let state = store.read();
        assert_eq!(state.processes, vec![process(10, "postgres", 3.5)]);
        assert!(state.connection.connected);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticks_and_ignores_in_flight_results() {
        let source = Arc::new(ScriptedSource::new(vec![40.0]).with_latency(Duration::from_secs(1)));
        let store = store();
        let mut poller = PollingCoordinator::start(source.clone(), store.clone(), PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(100)).await;
        poller.shutdown();

        tokio::time::sleep(Duration::from_secs(12)).await;
        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 1);
        assert!(store.read().metrics.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refresh_fetches_out_of_band() {
        let source = Arc::new(ScriptedSource::new(vec![1.0]));
        let store = store();
        let poller = PollingCoordinator::start(source.clone(), store, PollIntervals::default());

        tokio::time::sleep(Duration::from_millis(500)).await;
        poller.refresh_now();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.process_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_before_tickers_park_is_not_lost() {
        let source = Arc::new(ScriptedSource::new(vec![1.0]));
        let store = store();
        let poller = PollingCoordinator::start(source.clone(), store, PollIntervals::default());

        // Neither ticker task has been polled yet.
        poller.refresh_now();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.process_calls.load(Ordering::SeqCst), 2);
    }
}
