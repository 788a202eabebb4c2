//! Tick-driven flow simulation.
//!
//! The simulator owns everything that changes over time: the live message
//! set, the intake gate, the simulated clock, and the RNG. Topology and
//! consumer assignment are pure functions of the configuration, resolved
//! once per epoch and served read-only.

use crate::{ClusterTopology, ConsumerAssignment, FlowMetrics, RateGate, ThroughputWindow};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use streamsim_types::{
    AckMode, ClusterConfig, Message, MessageId, MessageSnapshot, PartitionId, ProducerId,
    COMPLETE_AT, CONSUMING_AT,
};
use tracing::{debug, trace};

/// Progress a message is held at when the intake gate denies the
/// brokered-to-consuming transition. Just below the boundary, so the
/// message stays brokered and retries next tick.
pub const HELD_AT: f64 = 65.9;

/// A message retired during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedMessage {
    /// Message identity.
    pub id: MessageId,

    /// Partition the message flowed through.
    pub partition: PartitionId,

    /// Simulated milliseconds from spawn to completion.
    pub latency_ms: f64,
}

/// Output of one simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Snapshot of every live message after the tick.
    pub messages: Vec<MessageSnapshot>,

    /// Throughput and backlog metrics.
    pub metrics: FlowMetrics,

    /// Messages retired this tick, with end-to-end latencies.
    pub completed: Vec<CompletedMessage>,

    /// Messages spawned this tick (at most one).
    pub spawned: u32,

    /// Messages dropped this tick for lack of an assigned consumer.
    pub dropped: u32,
}

/// Deterministic flow simulator for one cluster.
///
/// Construction seeds the RNG, so two simulators built with the same
/// configuration and seed, fed the same tick sequence, emit identical
/// reports. The simulator never reads a clock; the caller supplies elapsed
/// time and must do so in strictly increasing order.
pub struct FlowSimulator {
    config: ClusterConfig,
    topology: ClusterTopology,
    assignment: ConsumerAssignment,
    gate: RateGate,
    rng: ChaCha8Rng,
    messages: Vec<Message>,
    next_id: MessageId,
    now_ms: f64,
    window: ThroughputWindow,
}

impl FlowSimulator {
    /// Create a simulator for the given configuration and RNG seed.
    pub fn new(config: ClusterConfig, seed: u64) -> Self {
        let topology = ClusterTopology::resolve(&config);
        let assignment =
            ConsumerAssignment::assign(config.partitions, config.consumer_group_members);
        Self {
            config,
            topology,
            assignment,
            gate: RateGate::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            messages: Vec::new(),
            next_id: MessageId::FIRST,
            now_ms: 0.0,
            window: ThroughputWindow::new(),
        }
    }

    /// The configuration for the current epoch.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Resolved partition placements for the current epoch.
    pub fn topology(&self) -> &ClusterTopology {
        &self.topology
    }

    /// Consumer assignment for the current epoch.
    pub fn assignment(&self) -> &ConsumerAssignment {
        &self.assignment
    }

    /// Intake tokens currently available.
    pub fn gate_tokens(&self) -> f64 {
        self.gate.tokens()
    }

    /// Simulated time, in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of live messages.
    pub fn live_count(&self) -> usize {
        self.messages.len()
    }

    /// Install a new configuration, starting a new epoch.
    ///
    /// Topology and assignment caches are recomputed only when their inputs
    /// changed. Gate tokens survive the transition. Live messages whose
    /// partition no longer exists are discarded without counting as
    /// completions; all others carry over.
    pub fn set_config(&mut self, config: ClusterConfig) {
        let topology_changed = config.brokers != self.config.brokers
            || config.partitions != self.config.partitions
            || config.replication_factor != self.config.replication_factor
            || config.rack_awareness != self.config.rack_awareness;
        let assignment_changed = config.partitions != self.config.partitions
            || config.consumer_group_members != self.config.consumer_group_members;

        if topology_changed {
            self.topology = ClusterTopology::resolve(&config);
        }
        if assignment_changed {
            self.assignment =
                ConsumerAssignment::assign(config.partitions, config.consumer_group_members);
        }

        let before = self.messages.len();
        self.messages.retain(|m| m.partition.0 < config.partitions);
        let discarded = before - self.messages.len();

        debug!(
            topology_changed,
            assignment_changed, discarded, "configuration epoch changed"
        );
        self.config = config;
    }

    /// Advance the simulation by one tick.
    ///
    /// `elapsed_ms` is wall time since the previous tick; `speed` is the
    /// caller's time multiplier. Elapsed time drives token refill and the
    /// simulated clock, while message advancement is per-frame by the
    /// multiplier alone, keeping motion legible regardless of frame rate.
    pub fn tick(&mut self, elapsed_ms: f64, speed: f64) -> TickReport {
        let scaled_ms = elapsed_ms.max(0.0) * speed;
        self.now_ms += scaled_ms;
        self.gate.refill(scaled_ms, self.config.consume_intake_rate);

        let spawned = self.maybe_spawn(speed);

        let step = self.speed_factor() * speed;
        let mut completed = Vec::new();
        let mut dropped = 0u32;
        let mut retained = Vec::with_capacity(self.messages.len());

        for mut msg in self.messages.drain(..) {
            let mut next = msg.progress + step;

            if msg.progress < CONSUMING_AT && next >= CONSUMING_AT {
                if self.assignment.consumer_for(msg.partition).is_none() {
                    // No consumer will ever take this message; drop it at
                    // the boundary instead of letting it run forever.
                    trace!(id = %msg.id, partition = %msg.partition, "dropped unassigned message");
                    dropped += 1;
                    continue;
                }
                if !self.gate.try_consume() {
                    // Backpressure: hold at the boundary, stay brokered.
                    next = HELD_AT.max(msg.progress);
                }
            }

            msg.progress = next;

            if msg.progress >= COMPLETE_AT {
                self.window.record(self.now_ms);
                trace!(id = %msg.id, "message completed");
                completed.push(CompletedMessage {
                    id: msg.id,
                    partition: msg.partition,
                    latency_ms: self.now_ms - msg.spawned_at,
                });
            } else {
                retained.push(msg);
            }
        }
        self.messages = retained;

        self.window.prune(self.now_ms);
        let metrics = FlowMetrics::collect(&self.messages, &self.assignment, self.window.rate());

        TickReport {
            messages: self.messages.iter().map(Message::snapshot).collect(),
            metrics,
            completed,
            spawned,
            dropped,
        }
    }

    /// Spawn at most one message, with probability scaled from the produce
    /// rate. A cluster with no partitions or no producers spawns nothing.
    fn maybe_spawn(&mut self, speed: f64) -> u32 {
        if self.config.partitions == 0 || self.config.producers == 0 {
            return 0;
        }
        let spawn_probability = (self.config.produce_rate / 60.0) * speed;
        if self.rng.gen::<f64>() >= spawn_probability {
            return 0;
        }

        let msg = Message {
            id: self.next_id,
            partition: PartitionId(self.rng.gen_range(0..self.config.partitions)),
            producer: ProducerId(self.rng.gen_range(0..self.config.producers)),
            progress: 0.0,
            spawned_at: self.now_ms,
        };
        self.next_id = self.next_id.next();
        trace!(id = %msg.id, partition = %msg.partition, "spawned message");
        self.messages.push(msg);
        1
    }

    /// Per-frame progress step before the speed multiplier, derived from
    /// configuration: compression speeds delivery up, full-ISR
    /// acknowledgment and oversized batches slow it down.
    fn speed_factor(&self) -> f64 {
        let mut factor = 1.0;
        if self.config.compression.is_enabled() {
            factor *= 1.2;
        }
        if self.config.acks == AckMode::All {
            factor *= 0.8;
        }
        if self.config.batch_size_bytes > 16384 {
            factor *= 0.9;
        }
        factor
    }
}
