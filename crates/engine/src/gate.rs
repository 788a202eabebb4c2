//! Consumer intake rate limiting.
//!
//! Models the consumer group's aggregate intake capacity as a single token
//! bucket shared by every partition. The bucket holds at most one second's
//! worth of tokens, so a quiet period buys a bounded burst and nothing
//! more.

/// Token bucket gating the brokered-to-consuming transition.
///
/// The simulator owns the gate and drives refills from caller-supplied
/// elapsed time; the gate itself never reads a clock. Tokens are preserved
/// across configuration epochs.
#[derive(Debug, Clone, Default)]
pub struct RateGate {
    tokens: f64,
}

impl RateGate {
    /// Create an empty gate. Capacity accrues with the first refill.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add tokens for elapsed time at the given rate, capped at a one
    /// second burst (`rate_per_sec` tokens).
    pub fn refill(&mut self, elapsed_ms: f64, rate_per_sec: f64) {
        let rate = rate_per_sec.max(0.0);
        self.tokens += rate * elapsed_ms.max(0.0) / 1000.0;
        if self.tokens > rate {
            self.tokens = rate;
        }
    }

    /// Take one whole token. Returns `false` without consuming anything
    /// when less than a full token is available.
    pub fn try_consume(&mut self) -> bool {
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Tokens currently available.
    pub fn tokens(&self) -> f64 {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let mut gate = RateGate::new();
        assert_eq!(gate.tokens(), 0.0);
        assert!(!gate.try_consume());
    }

    #[test]
    fn test_refill_grants_whole_tokens() {
        let mut gate = RateGate::new();
        gate.refill(500.0, 10.0); // 5 tokens

        for _ in 0..5 {
            assert!(gate.try_consume());
        }
        assert!(!gate.try_consume(), "should deny after burst");
    }

    #[test]
    fn test_capacity_caps_at_one_second_burst() {
        let mut gate = RateGate::new();
        gate.refill(10_000.0, 8.0);
        assert_eq!(gate.tokens(), 8.0);
    }

    #[test]
    fn test_partial_token_is_not_consumable() {
        let mut gate = RateGate::new();
        gate.refill(90.0, 10.0); // 0.9 tokens
        assert!(!gate.try_consume());
        assert!(gate.tokens() > 0.0);

        gate.refill(10.0, 10.0); // tops up to 1.0
        assert!(gate.try_consume());
        assert!(!gate.try_consume());
    }

    #[test]
    fn test_tokens_never_negative() {
        let mut gate = RateGate::new();
        gate.refill(100.0, 10.0); // 1 token
        assert!(gate.try_consume());
        assert!(!gate.try_consume());
        assert!(gate.tokens() >= 0.0);

        gate.refill(-50.0, 10.0);
        assert!(gate.tokens() >= 0.0);
    }

    #[test]
    fn test_rate_drop_clamps_down_on_next_refill() {
        let mut gate = RateGate::new();
        gate.refill(1000.0, 50.0);
        assert_eq!(gate.tokens(), 50.0);

        // A lower configured rate shrinks the burst budget.
        gate.refill(0.0, 5.0);
        assert_eq!(gate.tokens(), 5.0);
    }
}
