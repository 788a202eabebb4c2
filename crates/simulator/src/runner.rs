//! Fixed-step run loop.

use crate::{HarnessConfig, RunReport};
use streamsim_engine::FlowSimulator;
use tracing::{debug, info};

/// Drives a [`FlowSimulator`] for a fixed number of ticks and aggregates
/// the results.
pub struct Harness {
    config: HarnessConfig,
    sim: FlowSimulator,
}

impl Harness {
    /// Create a harness from a run configuration.
    pub fn new(config: HarnessConfig) -> Self {
        let sim = FlowSimulator::new(config.cluster.clone(), config.seed);
        Self { config, sim }
    }

    /// Access the underlying simulator.
    pub fn simulator(&self) -> &FlowSimulator {
        &self.sim
    }

    /// Run the configured number of ticks and return the aggregated
    /// report.
    pub fn run(&mut self) -> RunReport {
        let mut report = RunReport::new();
        let log_every = (self.config.ticks / 10).max(1);

        info!(
            ticks = self.config.ticks,
            speed = self.config.speed,
            seed = self.config.seed,
            "starting run"
        );

        for tick in 0..self.config.ticks {
            let tick_report = self.sim.tick(self.config.tick_millis, self.config.speed);

            report.total_spawned += tick_report.spawned as u64;
            report.total_dropped += tick_report.dropped as u64;
            report.total_completed += tick_report.completed.len() as u64;
            report.peak_live = report.peak_live.max(tick_report.messages.len());
            if let Some(&backlog) = tick_report.metrics.partition_backlog.iter().max() {
                report.peak_backlog = report.peak_backlog.max(backlog);
            }
            for completion in &tick_report.completed {
                // Sub-millisecond completions saturate at the histogram
                // floor of 1 ms.
                let latency = (completion.latency_ms.round() as u64).max(1);
                let _ = report.latency.record(latency);
            }

            if (tick + 1) % log_every == 0 {
                debug!(
                    tick = tick + 1,
                    live = tick_report.messages.len(),
                    throughput = tick_report.metrics.throughput_per_sec,
                    "progress"
                );
            }
        }

        report.ticks = self.config.ticks;
        report.simulated_millis = self.sim.now_ms();

        info!(
            completed = report.total_completed,
            dropped = report.total_dropped,
            "run finished"
        );
        report
    }
}
