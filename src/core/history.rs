//! Rolling sample windows used for sparklines and trend charts

use std::collections::VecDeque;

use crate::api::SystemMetrics;

/// Sparkline window on the Overview section.
pub const OVERVIEW_CAPACITY: usize = 10;
/// CPU chart window on the Performance section.
pub const PERFORMANCE_CAPACITY: usize = 20;

/// Fixed-capacity, oldest-first sequence of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: T) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.samples.iter()
    }
}

impl<T: Clone> RollingBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

impl<T: PartialOrd> RollingBuffer<T> {
    /// Direction of the last step in the window.
    pub fn trend(&self) -> Trend {
        let mut recent = self.samples.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(current), Some(previous)) => Trend::between(previous, current),
            _ => Trend::Stable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn between<T: PartialOrd>(previous: &T, current: &T) -> Self {
        if current > previous {
            Self::Up
        } else if current < previous {
            Self::Down
        } else {
            Self::Stable
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Stable => "■",
        }
    }
}

/// Per-metric sparkline inputs for the Overview section.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewHistory {
    pub cpu: RollingBuffer<f64>,
    pub memory: RollingBuffer<f64>,
    pub disk: RollingBuffer<f64>,
    pub net_sent: RollingBuffer<u64>,
    pub net_recv: RollingBuffer<u64>,
}

impl OverviewHistory {
    pub fn new() -> Self {
        Self {
            cpu: RollingBuffer::new(OVERVIEW_CAPACITY),
            memory: RollingBuffer::new(OVERVIEW_CAPACITY),
            disk: RollingBuffer::new(OVERVIEW_CAPACITY),
            net_sent: RollingBuffer::new(OVERVIEW_CAPACITY),
            net_recv: RollingBuffer::new(OVERVIEW_CAPACITY),
        }
    }

    pub fn record(&mut self, metrics: &SystemMetrics) {
        self.cpu.push(metrics.cpu.usage);
        self.memory.push(metrics.memory.usage);
        self.disk.push(metrics.disk.usage);
        self.net_sent.push(metrics.network.bytes_sent);
        self.net_recv.push(metrics.network.bytes_recv);
    }
}

impl Default for OverviewHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// A CPU sample stamped with the local time it was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSample {
    pub label: String,
    pub value: f64,
}

/// Time-labelled CPU window for the Performance chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceHistory {
    pub cpu: RollingBuffer<LabelledSample>,
}

impl PerformanceHistory {
    pub fn new() -> Self {
        Self {
            cpu: RollingBuffer::new(PERFORMANCE_CAPACITY),
        }
    }

    pub fn record(&mut self, metrics: &SystemMetrics, at: chrono::DateTime<chrono::Local>) {
        self.cpu.push(LabelledSample {
            label: at.format("%H:%M:%S").to_string(),
            value: metrics.cpu.usage,
        });
    }

    pub fn values(&self) -> Vec<f64> {
        self.cpu.iter().map(|s| s.value).collect()
    }
}

impl Default for PerformanceHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Which thresholds apply when classifying a utilisation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpu,
    Memory,
    Disk,
}

/// Coarse load classification shown next to each gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Normal,
    Moderate,
    High,
}

impl Health {
    pub fn classify(resource: Resource, percent: f64) -> Self {
        let (moderate_at, high_at) = match resource {
            Resource::Cpu | Resource::Memory => (50.0, 80.0),
            Resource::Disk => (70.0, 90.0),
        };

        if percent >= high_at {
            Self::High
        } else if percent >= moderate_at {
            Self::Moderate
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures::metrics_with_cpu;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_keeps_last_n_in_arrival_order() {
        for len in [0usize, 1, 9, 10, 11, 25] {
            let mut buffer = RollingBuffer::new(10);
            for i in 0..len {
                buffer.push(i);
            }
            let expected: Vec<usize> = (len.saturating_sub(10)..len).collect();
            assert_eq!(buffer.len(), len.min(10));
            assert_eq!(buffer.to_vec(), expected, "after {len} samples");
        }
    }

    #[test]
    fn trend_compares_last_two_samples() {
        let mut buffer = RollingBuffer::new(10);
        assert_eq!(buffer.trend(), Trend::Stable);

        buffer.push(5u64);
        assert_eq!(buffer.trend(), Trend::Stable);

        buffer.push(9);
        assert_eq!(buffer.trend(), Trend::Up);

        buffer.push(3);
        assert_eq!(buffer.trend(), Trend::Down);

        buffer.push(3);
        assert_eq!(buffer.trend(), Trend::Stable);
    }

    #[test]
    fn overview_history_scenario() {
        let mut history = OverviewHistory::new();
        for cpu in [10.0, 55.0, 92.0] {
            history.record(&metrics_with_cpu(cpu));
        }

        assert_eq!(history.cpu.to_vec(), vec![10.0, 55.0, 92.0]);
        let latest = *history.cpu.latest().unwrap();
        assert_eq!(Health::classify(Resource::Cpu, latest).label(), "High");
    }

    #[test]
    fn performance_history_caps_at_twenty_with_labels() {
        let mut history = PerformanceHistory::new();
        let at = chrono::Local::now();
        for i in 0..25 {
            history.record(&metrics_with_cpu(i as f64), at);
        }

        assert_eq!(history.cpu.len(), PERFORMANCE_CAPACITY);
        assert_eq!(history.values().first().copied(), Some(5.0));
        assert_eq!(history.cpu.latest().unwrap().label.len(), "HH:MM:SS".len());
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(Health::classify(Resource::Cpu, 49.9), Health::Normal);
        assert_eq!(Health::classify(Resource::Memory, 50.0), Health::Moderate);
        assert_eq!(Health::classify(Resource::Cpu, 80.0), Health::High);
        assert_eq!(Health::classify(Resource::Disk, 85.0), Health::Moderate);
        assert_eq!(Health::classify(Resource::Disk, 90.0), Health::High);
    }
}
