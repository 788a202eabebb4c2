//! Cluster configuration.
//!
//! A `ClusterConfig` is immutable for the duration of a simulation epoch.
//! The engine caches topology and consumer assignment derived from it and
//! only recomputes when a new configuration is installed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Producer acknowledgment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckMode {
    /// Fire and forget, no acknowledgment.
    None,

    /// Acknowledged by the partition leader only.
    #[default]
    Leader,

    /// Acknowledged by all in-sync replicas. Slows message flow.
    All,
}

impl fmt::Display for AckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AckMode::None => write!(f, "0"),
            AckMode::Leader => write!(f, "1"),
            AckMode::All => write!(f, "all"),
        }
    }
}

/// Error parsing an [`AckMode`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ack mode: {0} (expected 0, 1, or all)")]
pub struct ParseAckModeError(pub String);

impl FromStr for AckMode {
    type Err = ParseAckModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "none" => Ok(AckMode::None),
            "1" | "leader" => Ok(AckMode::Leader),
            "all" => Ok(AckMode::All),
            _ => Err(ParseAckModeError(s.to_string())),
        }
    }
}

/// Message compression codec.
///
/// The flow model only distinguishes compressed from uncompressed traffic;
/// the specific codec is carried for interface fidelity with the
/// configuration surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    /// No compression.
    #[default]
    None,
    /// Gzip codec.
    Gzip,
    /// Snappy codec.
    Snappy,
    /// LZ4 codec.
    Lz4,
    /// Zstd codec.
    Zstd,
}

impl Compression {
    /// Whether compression is enabled at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Compression::None)
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Snappy => "snappy",
            Compression::Lz4 => "lz4",
            Compression::Zstd => "zstd",
        };
        write!(f, "{}", name)
    }
}

/// Error parsing a [`Compression`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compression codec: {0} (expected none, gzip, snappy, lz4, or zstd)")]
pub struct ParseCompressionError(pub String);

impl FromStr for Compression {
    type Err = ParseCompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "gzip" => Ok(Compression::Gzip),
            "snappy" => Ok(Compression::Snappy),
            "lz4" => Ok(Compression::Lz4),
            "zstd" => Ok(Compression::Zstd),
            _ => Err(ParseCompressionError(s.to_string())),
        }
    }
}

/// Configuration for one simulation epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Number of brokers in the cluster.
    pub brokers: u32,

    /// Number of producers feeding the cluster.
    pub producers: u32,

    /// Number of topic partitions.
    pub partitions: u32,

    /// Copies of each partition, leader included.
    pub replication_factor: u32,

    /// Consumer-group size. Zero means no consumers: messages reaching the
    /// consuming boundary are dropped.
    pub consumer_group_members: u32,

    /// Place replicas across fault domains when possible.
    pub rack_awareness: bool,

    /// Producer acknowledgment mode.
    pub acks: AckMode,

    /// Producer retry budget. Carried on the configuration surface; the
    /// flow model does not consume it.
    pub retries: u32,

    /// Producer batch size in bytes. Batches above 16 KiB slow the flow.
    pub batch_size_bytes: u32,

    /// Message compression codec.
    pub compression: Compression,

    /// Expected produce rate in messages per second.
    pub produce_rate: f64,

    /// Aggregate consumer-group intake capacity in messages per second.
    pub consume_intake_rate: f64,
}

impl ClusterConfig {
    /// Create a configuration with the given broker and partition counts,
    /// defaults elsewhere.
    pub fn new(brokers: u32, partitions: u32) -> Self {
        Self {
            brokers,
            partitions,
            ..Self::default()
        }
    }

    /// Set the producer count.
    pub fn with_producers(mut self, producers: u32) -> Self {
        self.producers = producers;
        self
    }

    /// Set the replication factor (minimum 1).
    pub fn with_replication_factor(mut self, factor: u32) -> Self {
        self.replication_factor = factor.max(1);
        self
    }

    /// Set the consumer-group size.
    pub fn with_consumer_group_members(mut self, members: u32) -> Self {
        self.consumer_group_members = members;
        self
    }

    /// Enable or disable rack-aware replica placement.
    pub fn with_rack_awareness(mut self, enabled: bool) -> Self {
        self.rack_awareness = enabled;
        self
    }

    /// Set the acknowledgment mode.
    pub fn with_acks(mut self, acks: AckMode) -> Self {
        self.acks = acks;
        self
    }

    /// Set the producer retry budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the producer batch size in bytes.
    pub fn with_batch_size_bytes(mut self, bytes: u32) -> Self {
        self.batch_size_bytes = bytes;
        self
    }

    /// Set the compression codec.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the produce rate in messages per second (clamped non-negative).
    pub fn with_produce_rate(mut self, rate: f64) -> Self {
        self.produce_rate = rate.max(0.0);
        self
    }

    /// Set the consumer intake rate in messages per second (clamped
    /// non-negative).
    pub fn with_consume_intake_rate(mut self, rate: f64) -> Self {
        self.consume_intake_rate = rate.max(0.0);
        self
    }

    /// Number of replica copies each partition actually gets, leader
    /// included. Bounded by the broker count.
    pub fn effective_replication(&self) -> u32 {
        self.replication_factor.min(self.brokers)
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            brokers: 3,
            producers: 1,
            partitions: 3,
            replication_factor: 1,
            consumer_group_members: 1,
            rack_awareness: false,
            acks: AckMode::Leader,
            retries: 0,
            batch_size_bytes: 16384,
            compression: Compression::None,
            produce_rate: 10.0,
            consume_intake_rate: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_control_surface() {
        let config = ClusterConfig::default();
        assert_eq!(config.brokers, 3);
        assert_eq!(config.partitions, 3);
        assert_eq!(config.replication_factor, 1);
        assert_eq!(config.consumer_group_members, 1);
        assert_eq!(config.acks, AckMode::Leader);
        assert_eq!(config.batch_size_bytes, 16384);
        assert_eq!(config.compression, Compression::None);
    }

    #[test]
    fn test_builder_clamps() {
        let config = ClusterConfig::new(4, 8)
            .with_replication_factor(0)
            .with_produce_rate(-5.0);
        assert_eq!(config.replication_factor, 1);
        assert_eq!(config.produce_rate, 0.0);
    }

    #[test]
    fn test_effective_replication_bounded_by_brokers() {
        let config = ClusterConfig::new(3, 6).with_replication_factor(5);
        assert_eq!(config.effective_replication(), 3);

        let config = ClusterConfig::new(5, 6).with_replication_factor(2);
        assert_eq!(config.effective_replication(), 2);
    }

    #[test]
    fn test_ack_mode_parsing() {
        assert_eq!("0".parse::<AckMode>().unwrap(), AckMode::None);
        assert_eq!("1".parse::<AckMode>().unwrap(), AckMode::Leader);
        assert_eq!("all".parse::<AckMode>().unwrap(), AckMode::All);
        assert_eq!("Leader".parse::<AckMode>().unwrap(), AckMode::Leader);
        assert!("2".parse::<AckMode>().is_err());
    }

    #[test]
    fn test_compression_parsing() {
        assert_eq!("none".parse::<Compression>().unwrap(), Compression::None);
        assert_eq!("zstd".parse::<Compression>().unwrap(), Compression::Zstd);
        assert!("brotli".parse::<Compression>().is_err());
        assert!(!Compression::None.is_enabled());
        assert!(Compression::Lz4.is_enabled());
    }
}
