//! Per-tick flow metrics.

use crate::ConsumerAssignment;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use streamsim_types::{Message, PartitionId, Stage};

/// Width of the trailing completion window, in simulated milliseconds.
const WINDOW_MS: f64 = 1000.0;

/// Sliding one-second window of completion timestamps.
///
/// Timestamps are simulated-clock milliseconds, so throughput tracks the
/// simulation rather than wall time and stays deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct ThroughputWindow {
    completions: VecDeque<f64>,
}

impl ThroughputWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion at the given simulated time.
    pub fn record(&mut self, at_ms: f64) {
        self.completions.push_back(at_ms);
    }

    /// Drop completions older than the window.
    pub fn prune(&mut self, now_ms: f64) {
        let horizon = now_ms - WINDOW_MS;
        while self.completions.front().is_some_and(|&t| t <= horizon) {
            self.completions.pop_front();
        }
    }

    /// Completions within the window — the current messages-per-second
    /// throughput.
    pub fn rate(&self) -> u32 {
        self.completions.len() as u32
    }
}

/// Metrics block emitted with every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Completions over the trailing simulated second.
    pub throughput_per_sec: u32,

    /// Live messages currently in flight.
    pub live_messages: u32,

    /// Brokered (backlogged) message count per partition, indexed by
    /// partition id.
    pub partition_backlog: Vec<u32>,

    /// Backlog per consumer, summed over that consumer's partitions.
    /// Backlog on unassigned partitions appears in no consumer's total.
    pub consumer_backlog: Vec<u32>,
}

impl FlowMetrics {
    /// Compute metrics from the live message set.
    pub fn collect(
        messages: &[Message],
        assignment: &ConsumerAssignment,
        throughput_per_sec: u32,
    ) -> Self {
        let partitions = assignment.partition_count() as usize;
        let members = assignment.member_count() as usize;

        let mut partition_backlog = vec![0u32; partitions];
        for msg in messages {
            if msg.stage() == Stage::Brokered {
                if let Some(slot) = partition_backlog.get_mut(msg.partition.0 as usize) {
                    *slot += 1;
                }
            }
        }

        let mut consumer_backlog = vec![0u32; members];
        for (p, &backlog) in partition_backlog.iter().enumerate() {
            if let Some(consumer) = assignment.consumer_for(PartitionId(p as u32)) {
                consumer_backlog[consumer.0 as usize] += backlog;
            }
        }

        Self {
            throughput_per_sec,
            live_messages: messages.len() as u32,
            partition_backlog,
            consumer_backlog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamsim_types::{MessageId, PartitionId, ProducerId};

    fn message(id: u64, partition: u32, progress: f64) -> Message {
        Message {
            id: MessageId(id),
            partition: PartitionId(partition),
            producer: ProducerId(0),
            progress,
            spawned_at: 0.0,
        }
    }

    #[test]
    fn test_window_prunes_old_completions() {
        let mut window = ThroughputWindow::new();
        window.record(100.0);
        window.record(600.0);
        window.record(1500.0);

        window.prune(1600.0);
        assert_eq!(window.rate(), 2); // 100.0 aged out

        window.prune(2600.0);
        assert_eq!(window.rate(), 0);
    }

    #[test]
    fn test_backlog_counts_brokered_only() {
        let messages = vec![
            message(0, 0, 10.0),  // producing
            message(1, 0, 40.0),  // brokered
            message(2, 0, 50.0),  // brokered
            message(3, 1, 70.0),  // consuming
            message(4, 2, 33.0),  // brokered
        ];
        let assignment = ConsumerAssignment::assign(3, 2);
        let metrics = FlowMetrics::collect(&messages, &assignment, 0);

        assert_eq!(metrics.partition_backlog, vec![2, 0, 1]);
        assert_eq!(metrics.live_messages, 5);
    }

    #[test]
    fn test_consumer_backlog_sums_assigned_partitions() {
        // Partitions 0 and 2 -> consumer 0; partition 1 -> consumer 1.
        let messages = vec![
            message(0, 0, 40.0),
            message(1, 1, 40.0),
            message(2, 2, 40.0),
            message(3, 2, 45.0),
        ];
        let assignment = ConsumerAssignment::assign(3, 2);
        let metrics = FlowMetrics::collect(&messages, &assignment, 0);

        assert_eq!(metrics.consumer_backlog, vec![3, 1]);
    }

    #[test]
    fn test_unassigned_backlog_belongs_to_no_consumer() {
        let messages = vec![message(0, 0, 40.0), message(1, 1, 40.0)];
        let assignment = ConsumerAssignment::assign(2, 0);
        let metrics = FlowMetrics::collect(&messages, &assignment, 0);

        assert_eq!(metrics.partition_backlog, vec![1, 1]);
        assert!(metrics.consumer_backlog.is_empty());
    }
}
