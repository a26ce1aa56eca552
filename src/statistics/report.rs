use super::Statistics;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serializable rendering of [`Statistics`] with every duration as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub success: usize,
    pub failure: usize,
    pub total_time: String,
    pub total_produce: String,
    pub total_consume: String,
    pub block_times: Vec<String>,
    pub produce_times: Vec<String>,
    pub consume_times: Vec<String>,
}

impl StatisticsReport {
    pub fn to_json(&self) -> String {
        // Only strings and integers, so serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl From<&Statistics> for StatisticsReport {
    fn from(stats: &Statistics) -> Self {
        Self {
            success: stats.success,
            failure: stats.failure,
            total_time: format_duration(stats.total_time),
            total_produce: format_duration(stats.total_produce),
            total_consume: format_duration(stats.total_consume),
            block_times: format_durations(&stats.block_times),
            produce_times: format_durations(&stats.produce_times),
            consume_times: format_durations(&stats.consume_times),
        }
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{duration:?}")
}

fn format_durations(durations: &[Duration]) -> Vec<String> {
    durations.iter().copied().map(format_duration).collect()
}
