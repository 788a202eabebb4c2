//! In-flight message model.
//!
//! A message's position in the pipeline is a single continuous `progress`
//! value in `[0, 100]`. The lifecycle stage is never stored independently;
//! it is a pure projection of progress via [`Stage::of`], so the two cannot
//! diverge.

use crate::{MessageId, PartitionId, ProducerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress at which a message lands on its partition leader.
pub const BROKERED_AT: f64 = 33.0;

/// Progress at which a message leaves the broker for its consumer.
pub const CONSUMING_AT: f64 = 66.0;

/// Progress at which a message is fully consumed and retired.
pub const COMPLETE_AT: f64 = 100.0;

/// Lifecycle stage of an in-flight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// In transit from a producer to a partition leader.
    Producing,

    /// Resident on the broker, awaiting consumer capacity.
    Brokered,

    /// In transit from the broker to its assigned consumer.
    Consuming,
}

impl Stage {
    /// Project the stage from a progress value.
    pub fn of(progress: f64) -> Stage {
        if progress < BROKERED_AT {
            Stage::Producing
        } else if progress < CONSUMING_AT {
            Stage::Brokered
        } else {
            Stage::Consuming
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Producing => "producing",
            Stage::Brokered => "brokered",
            Stage::Consuming => "consuming",
        };
        write!(f, "{}", name)
    }
}

/// An in-flight message owned by the flow simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Monotonic identity, unique within a simulation run.
    pub id: MessageId,

    /// Destination partition, fixed at creation.
    pub partition: PartitionId,

    /// Originating producer, fixed at creation.
    pub producer: ProducerId,

    /// Pipeline position in `[0, 100]`.
    pub progress: f64,

    /// Simulated timestamp (ms) at which the message was spawned.
    pub spawned_at: f64,
}

impl Message {
    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        Stage::of(self.progress)
    }

    /// Take a snapshot suitable for handing to a presentation layer.
    pub fn snapshot(&self) -> MessageSnapshot {
        MessageSnapshot {
            id: self.id,
            partition: self.partition,
            producer: self.producer,
            progress: self.progress,
            stage: self.stage(),
        }
    }
}

/// Read-only view of one in-flight message, emitted per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    /// Message identity.
    pub id: MessageId,

    /// Destination partition.
    pub partition: PartitionId,

    /// Originating producer.
    pub producer: ProducerId,

    /// Pipeline position in `[0, 100]`.
    pub progress: f64,

    /// Lifecycle stage, consistent with `progress`.
    pub stage: Stage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(Stage::of(0.0), Stage::Producing);
        assert_eq!(Stage::of(32.9), Stage::Producing);
        assert_eq!(Stage::of(33.0), Stage::Brokered);
        assert_eq!(Stage::of(65.9), Stage::Brokered);
        assert_eq!(Stage::of(66.0), Stage::Consuming);
        assert_eq!(Stage::of(99.9), Stage::Consuming);
    }

    #[test]
    fn test_snapshot_stage_consistency() {
        let msg = Message {
            id: MessageId(7),
            partition: PartitionId(2),
            producer: ProducerId(0),
            progress: 47.5,
            spawned_at: 0.0,
        };
        let snap = msg.snapshot();
        assert_eq!(snap.stage, Stage::Brokered);
        assert_eq!(snap.stage, Stage::of(snap.progress));
        assert_eq!(snap.id, MessageId(7));
    }
}
