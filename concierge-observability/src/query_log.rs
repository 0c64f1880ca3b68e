//! Query performance logging: query text, branch taken, per-stage latency, result count.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single request's outcome, recorded after generation completes (§10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    /// `true` when the RETRIEVAL branch ran, `false` for DIRECT (§4.2).
    pub need_retrieval: bool,
    pub total_latency: Duration,
    pub retrieval_latency: Duration,
    pub ranking_latency: Duration,
    pub generation_latency: Duration,
    pub result_count: usize,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    pub fn new(
        query: impl Into<String>,
        need_retrieval: bool,
        total_latency: Duration,
        retrieval_latency: Duration,
        ranking_latency: Duration,
        generation_latency: Duration,
        result_count: usize,
    ) -> Self {
        Self {
            query: query.into(),
            need_retrieval,
            total_latency,
            retrieval_latency,
            ranking_latency,
            generation_latency,
            result_count,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only, bounded-capacity query log kept in process memory for the
/// life of the server (§10). Not persisted — a restart drops it.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(50_000)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            need_retrieval = entry.need_retrieval,
            total_latency_ms = entry.total_latency.as_millis() as u64,
            result_count = entry.result_count,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub fn avg_total_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.total_latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0..=1.0), nearest-rank.
    pub fn total_latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.total_latency).collect();
        latencies.sort();
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_drops_oldest_entries_past_capacity() {
        let mut log = QueryLog::with_capacity(2);
        for i in 0..3 {
            log.record(QueryLogEntry::new(
                format!("query {i}"),
                true,
                Duration::from_millis(100),
                Duration::from_millis(50),
                Duration::from_millis(20),
                Duration::from_millis(30),
                5,
            ));
        }
        assert_eq!(log.count(), 2);
        assert_eq!(log.entries()[0].query, "query 1");
    }

    #[test]
    fn percentile_of_empty_log_is_zero() {
        let log = QueryLog::new();
        assert_eq!(log.total_latency_percentile(0.95), Duration::ZERO);
    }

    #[test]
    fn p100_percentile_is_the_slowest_entry() {
        let mut log = QueryLog::new();
        for ms in [100, 50, 300, 200] {
            log.record(QueryLogEntry::new(
                "q",
                true,
                Duration::from_millis(ms),
                Duration::ZERO,
                Duration::ZERO,
                Duration::ZERO,
                1,
            ));
        }
        assert_eq!(log.total_latency_percentile(1.0), Duration::from_millis(300));
    }
}
