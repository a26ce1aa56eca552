//! # Run Statistics
//!
//! Timing and outcome bookkeeping for one orchestration run. The three
//! per-producer duration vectors are indexed by submission order, so entry
//! `i` always describes the `i`-th producer passed in, whatever order the
//! outcomes were consumed in.

mod report;

pub use report::StatisticsReport;

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Producers whose value reached the consumer
    pub success: usize,
    /// Producers whose failure reached the error handler
    pub failure: usize,
    /// Launch-to-handoff time of each producer
    pub produce_times: Vec<Duration>,
    /// Time spent in `consume` / `on_error` for each producer's outcome
    pub consume_times: Vec<Duration>,
    /// Time the consumption loop waited for each producer's outcome
    pub block_times: Vec<Duration>,
    /// Run start until the last outcome was consumed
    pub total_time: Duration,
    /// Run start until the last producer handed off its outcome
    pub total_produce: Duration,
    /// Wall time of the consumption loop
    pub total_consume: Duration,
}

impl Statistics {
    /// Zeroed statistics sized for `producers` producers
    pub fn new(producers: usize) -> Self {
        Self {
            produce_times: vec![Duration::ZERO; producers],
            consume_times: vec![Duration::ZERO; producers],
            block_times: vec![Duration::ZERO; producers],
            ..Self::default()
        }
    }

    /// Number of producers the run was sized for
    pub fn producers(&self) -> usize {
        self.produce_times.len()
    }

    /// Number of outcomes consumed (success + failure)
    pub fn total(&self) -> usize {
        self.success + self.failure
    }

    pub fn is_empty(&self) -> bool {
        self.producers() == 0
    }

    /// Fraction of consumed outcomes that were successes (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.success as f64 / self.total() as f64
        }
    }

    /// Sum of all per-producer produce times
    pub fn cumulative_produce_time(&self) -> Duration {
        self.produce_times.iter().sum()
    }

    /// Sum of all per-producer block times
    pub fn cumulative_block_time(&self) -> Duration {
        self.block_times.iter().sum()
    }

    pub(crate) fn record_success(&mut self) {
        self.success += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failure += 1;
    }

    pub fn report(&self) -> StatisticsReport {
        StatisticsReport::from(self)
    }

    /// Pretty-printed JSON rendering of [`Statistics::report`]
    pub fn to_json(&self) -> String {
        self.report().to_json()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sizes_all_duration_vectors() {
        let stats = Statistics::new(3);
        assert_eq!(stats.produce_times, vec![Duration::ZERO; 3]);
        assert_eq!(stats.consume_times.len(), 3);
        assert_eq!(stats.block_times.len(), 3);
        assert_eq!(stats.producers(), 3);
        assert_eq!(stats.total(), 0);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::new(0);
        assert!(stats.is_empty());
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.cumulative_produce_time(), Duration::ZERO);
    }

    #[test]
    fn test_counters_and_rates() {
        let mut stats = Statistics::new(4);
        stats.record_success();
        stats.record_success();
        stats.record_success();
        stats.record_failure();

        assert_eq!(stats.total(), 4);
        assert_eq!(stats.success_rate(), 0.75);
    }

    #[test]
    fn test_cumulative_times() {
        let mut stats = Statistics::new(2);
        stats.produce_times = vec![Duration::from_millis(50), Duration::from_millis(30)];
        stats.block_times = vec![Duration::from_millis(20), Duration::from_millis(30)];

        assert_eq!(stats.cumulative_produce_time(), Duration::from_millis(80));
        assert_eq!(stats.cumulative_block_time(), Duration::from_millis(50));
    }

    #[test]
    fn test_display_matches_json() {
        let stats = Statistics::new(1);
        assert_eq!(stats.to_string(), stats.to_json());
    }
}
