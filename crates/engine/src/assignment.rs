//! Static partition-to-consumer assignment.

use streamsim_types::{ConsumerId, PartitionId};

/// Assignment of partitions to consumer-group members.
///
/// The mapping is `partition mod members` — a pure function of the
/// partition and member counts, stable across ticks until either count
/// changes. With an empty group every partition is unassigned and messages
/// reaching the consuming boundary are dropped by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerAssignment {
    partitions: u32,
    members: u32,
}

impl ConsumerAssignment {
    /// Compute the assignment for the given partition and member counts.
    pub fn assign(partitions: u32, members: u32) -> Self {
        Self {
            partitions,
            members,
        }
    }

    /// The consumer responsible for a partition, or `None` when the group
    /// is empty or the partition does not exist.
    pub fn consumer_for(&self, partition: PartitionId) -> Option<ConsumerId> {
        if self.members == 0 || partition.0 >= self.partitions {
            return None;
        }
        Some(ConsumerId(partition.0 % self.members))
    }

    /// The partitions assigned to one consumer, in ascending order.
    pub fn partitions_for(&self, consumer: ConsumerId) -> impl Iterator<Item = PartitionId> {
        let step = self.members.max(1) as usize;
        let end = if self.members > 0 && consumer.0 < self.members {
            self.partitions
        } else {
            0
        };
        (consumer.0..end).step_by(step).map(PartitionId)
    }

    /// Number of partitions covered by this assignment.
    pub fn partition_count(&self) -> u32 {
        self.partitions
    }

    /// Number of consumer-group members.
    pub fn member_count(&self) -> u32 {
        self.members
    }
}
