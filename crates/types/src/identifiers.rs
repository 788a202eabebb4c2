//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrokerId(pub u32);

impl BrokerId {
    /// Get the rack this broker lives in.
    ///
    /// Brokers are split into two fault domains by id parity. This is a
    /// fixed property of the cluster model, consulted only when rack
    /// awareness is enabled.
    pub fn rack(&self) -> RackId {
        RackId((self.0 % 2) as u8)
    }
}

impl fmt::Display for BrokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Broker({})", self.0)
    }
}

/// Partition identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionId(pub u32);

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Partition({})", self.0)
    }
}

/// Consumer-group member identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsumerId(pub u32);

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Consumer({})", self.0)
    }
}

/// Producer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProducerId(pub u32);

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Producer({})", self.0)
    }
}

/// Monotonically increasing message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// First message id in a simulation run.
    pub const FIRST: Self = MessageId(0);

    /// Get the next message id.
    pub fn next(self) -> Self {
        MessageId(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({})", self.0)
    }
}

/// Rack (fault domain) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RackId(pub u8);

impl fmt::Display for RackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rack({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_ordering() {
        let id = MessageId::FIRST;
        assert_eq!(id.next(), MessageId(1));
        assert!(id < id.next());
        assert_eq!(MessageId(41).next(), MessageId(42));
    }

    #[test]
    fn test_broker_rack_parity() {
        assert_eq!(BrokerId(0).rack(), RackId(0));
        assert_eq!(BrokerId(1).rack(), RackId(1));
        assert_eq!(BrokerId(2).rack(), RackId(0));
        assert_eq!(BrokerId(7).rack(), RackId(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(BrokerId(3).to_string(), "Broker(3)");
        assert_eq!(PartitionId(0).to_string(), "Partition(0)");
        assert_eq!(ConsumerId(2).to_string(), "Consumer(2)");
        assert_eq!(MessageId(9).to_string(), "Message(9)");
    }
}
