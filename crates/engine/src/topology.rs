//! Partition-to-broker placement.
//!
//! Placement is a pure function of the cluster configuration: leaders
//! rotate round-robin across brokers, and follower replicas walk forward
//! from the leader. With rack awareness enabled, brokers are split into two
//! fault domains by id parity and a follower landing in the leader's rack
//! is nudged to the next broker when that broker is not the leader itself.
//!
//! The rack rule is a best-effort anti-affinity heuristic, not a guarantee
//! of full rack disjointness across all replicas. When the replication
//! factor crowds the broker count, the same broker can be asked to hold
//! more than one replica slot of a partition; such duplicates collapse to a
//! single physical replica, and [`ClusterTopology::partitions_on`] counts
//! them once.

use streamsim_types::{BrokerId, ClusterConfig, PartitionId, RackId};
use tracing::debug;

/// Ordered replica set for one partition. The first entry is the leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlacement {
    partition: PartitionId,
    replicas: Vec<BrokerId>,
}

impl PartitionPlacement {
    /// The partition this placement is for.
    pub fn partition(&self) -> PartitionId {
        self.partition
    }

    /// The leader broker.
    pub fn leader(&self) -> BrokerId {
        self.replicas[0]
    }

    /// Follower brokers, in replica-slot order. May contain duplicates.
    pub fn followers(&self) -> &[BrokerId] {
        &self.replicas[1..]
    }

    /// All replica slots, leader first.
    pub fn replicas(&self) -> &[BrokerId] {
        &self.replicas
    }

    /// Distinct brokers hosting this partition, leader first, with
    /// collapsed duplicate slots removed.
    pub fn distinct_brokers(&self) -> Vec<BrokerId> {
        let mut seen = Vec::with_capacity(self.replicas.len());
        for &broker in &self.replicas {
            if !seen.contains(&broker) {
                seen.push(broker);
            }
        }
        seen
    }

    /// Whether the given broker hosts this partition (as leader or
    /// follower).
    pub fn hosts(&self, broker: BrokerId) -> bool {
        self.replicas.contains(&broker)
    }
}

/// Resolved placement for every partition in the cluster.
///
/// Pure function of `(brokers, partitions, replication_factor,
/// rack_awareness)`; the simulator caches one per epoch and recomputes it
/// whenever any of those inputs change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTopology {
    placements: Vec<PartitionPlacement>,
    brokers: u32,
    rack_awareness: bool,
}

impl ClusterTopology {
    /// Resolve placements from a configuration.
    ///
    /// A cluster with zero brokers has no placement at all: the result is
    /// empty rather than an error.
    pub fn resolve(config: &ClusterConfig) -> Self {
        let brokers = config.brokers;
        if brokers == 0 {
            debug!("no brokers configured, topology is empty");
            return Self {
                placements: Vec::new(),
                brokers,
                rack_awareness: config.rack_awareness,
            };
        }

        let replica_slots = config.effective_replication().saturating_sub(1);
        let rack_aware = config.rack_awareness && brokers > 2;

        let placements = (0..config.partitions)
            .map(|p| {
                let leader = BrokerId(p % brokers);
                let mut replicas = Vec::with_capacity(1 + replica_slots as usize);
                replicas.push(leader);

                for r in 0..replica_slots {
                    let mut candidate = BrokerId((leader.0 + r + 1) % brokers);
                    if rack_aware && candidate.rack() == leader.rack() {
                        let substitute = BrokerId((candidate.0 + 1) % brokers);
                        if substitute != leader {
                            candidate = substitute;
                        }
                    }
                    replicas.push(candidate);
                }

                PartitionPlacement {
                    partition: PartitionId(p),
                    replicas,
                }
            })
            .collect();

        debug!(
            brokers,
            partitions = config.partitions,
            replication = config.effective_replication(),
            rack_aware,
            "resolved cluster topology"
        );

        Self {
            placements,
            brokers,
            rack_awareness: config.rack_awareness,
        }
    }

    /// Placement for one partition, if it exists.
    pub fn placement(&self, partition: PartitionId) -> Option<&PartitionPlacement> {
        self.placements.get(partition.0 as usize)
    }

    /// All placements, in partition order.
    pub fn placements(&self) -> &[PartitionPlacement] {
        &self.placements
    }

    /// Leader broker for a partition, if placed.
    pub fn leader_of(&self, partition: PartitionId) -> Option<BrokerId> {
        self.placement(partition).map(|p| p.leader())
    }

    /// Number of distinct partitions hosted on a broker, counting a
    /// collapsed duplicate slot once.
    pub fn partitions_on(&self, broker: BrokerId) -> usize {
        self.placements.iter().filter(|p| p.hosts(broker)).count()
    }

    /// Rack of a broker, when rack awareness is enabled.
    pub fn rack_of(&self, broker: BrokerId) -> Option<RackId> {
        self.rack_awareness.then(|| broker.rack())
    }

    /// Number of partitions placed.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether no partitions are placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
