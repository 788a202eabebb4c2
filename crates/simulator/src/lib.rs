//! Streamsim harness
//!
//! A long-running driver built on top of the flow engine. Provides run
//! configuration, a fixed-step tick loop, and latency/throughput reporting
//! for studying cluster behavior under different configurations.
//!
//! # Example
//!
//! ```ignore
//! use streamsim_simulator::{Harness, HarnessConfig};
//! use streamsim_types::ClusterConfig;
//!
//! let cluster = ClusterConfig::new(4, 8).with_replication_factor(2);
//! let config = HarnessConfig::new(cluster).with_ticks(10_000).with_seed(42);
//!
//! let report = Harness::new(config).run();
//! println!("avg throughput: {:.1} msg/s", report.average_throughput());
//! println!("p99 latency: {} ms", report.p99_latency_ms());
//! ```

mod config;
mod report;
mod runner;

pub use config::HarnessConfig;
pub use report::RunReport;
pub use runner::Harness;
