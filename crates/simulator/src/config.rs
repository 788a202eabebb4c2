//! Configuration types for the harness.

use streamsim_types::ClusterConfig;

/// Configuration for one harness run.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Cluster configuration handed to the engine.
    pub cluster: ClusterConfig,

    /// Number of ticks to drive.
    pub ticks: u64,

    /// Wall-time length of each tick in milliseconds. The default models a
    /// 60 Hz animation frame.
    pub tick_millis: f64,

    /// Simulation speed multiplier.
    pub speed: f64,

    /// Random seed for deterministic runs.
    pub seed: u64,
}

impl HarnessConfig {
    /// Create a harness configuration for a cluster, defaults elsewhere.
    pub fn new(cluster: ClusterConfig) -> Self {
        Self {
            cluster,
            ticks: 3600,
            tick_millis: 1000.0 / 60.0,
            speed: 1.0,
            seed: 12345,
        }
    }

    /// Set the number of ticks to drive.
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    /// Set the per-tick wall time in milliseconds.
    pub fn with_tick_millis(mut self, millis: f64) -> Self {
        self.tick_millis = millis;
        self
    }

    /// Set the speed multiplier.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total simulated time the run covers, in milliseconds.
    pub fn simulated_millis(&self) -> f64 {
        self.ticks as f64 * self.tick_millis * self.speed
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(ClusterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = HarnessConfig::default()
            .with_ticks(100)
            .with_speed(2.0)
            .with_seed(7);
        assert_eq!(config.ticks, 100);
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_simulated_millis_scales_with_speed() {
        let config = HarnessConfig::default()
            .with_ticks(60)
            .with_tick_millis(10.0)
            .with_speed(2.0);
        assert_eq!(config.simulated_millis(), 1200.0);
    }
}
