//! Deterministic flow simulation for a partitioned message-queue cluster.
//!
//! This crate models how messages move through a replicated broker cluster:
//! producers push records into partitions, partitions are replicated across
//! brokers (optionally rack-aware), and a consumer group drains them subject
//! to a bounded intake rate. Given the same seed and tick sequence, a run
//! produces identical results every time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     FlowSimulator                        │
//! │                                                          │
//! │  ClusterConfig ──► ClusterTopology     (cached per epoch)│
//! │               └──► ConsumerAssignment  (cached per epoch)│
//! │                                                          │
//! │  tick(elapsed, speed):                                   │
//! │    refill RateGate ─► spawn ─► advance each message      │
//! │    ─► gate the brokered→consuming boundary               │
//! │    ─► retire completed ─► collect FlowMetrics            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The simulator has no internal clock and performs no I/O; the caller
//! drives it with elapsed-time deltas, one tick at a time. Pausing is
//! simply not ticking.

mod assignment;
mod gate;
mod metrics;
mod simulator;
mod topology;

pub use assignment::ConsumerAssignment;
pub use gate::RateGate;
pub use metrics::{FlowMetrics, ThroughputWindow};
pub use simulator::{CompletedMessage, FlowSimulator, TickReport, HELD_AT};
pub use topology::{ClusterTopology, PartitionPlacement};
