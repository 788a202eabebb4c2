//! Core types for the streamsim cluster flow simulation.
//!
//! This crate holds the vocabulary shared by the engine and any harness or
//! presentation layer sitting on top of it: identifier newtypes, the
//! immutable cluster configuration, and the in-flight message model. It
//! contains no simulation logic.

mod config;
mod identifiers;
mod message;

pub use config::{
    AckMode, ClusterConfig, Compression, ParseAckModeError, ParseCompressionError,
};
pub use identifiers::{BrokerId, ConsumerId, MessageId, PartitionId, ProducerId, RackId};
pub use message::{Message, MessageSnapshot, Stage, BROKERED_AT, COMPLETE_AT, CONSUMING_AT};
