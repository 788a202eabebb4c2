//! Run reporting.

use hdrhistogram::Histogram;

/// Aggregate statistics for one harness run.
#[derive(Clone)]
pub struct RunReport {
    pub(crate) latency: Histogram<u64>,
    pub(crate) total_spawned: u64,
    pub(crate) total_completed: u64,
    pub(crate) total_dropped: u64,
    pub(crate) peak_live: usize,
    pub(crate) peak_backlog: u32,
    pub(crate) ticks: u64,
    pub(crate) simulated_millis: f64,
}

impl RunReport {
    pub(crate) fn new() -> Self {
        Self {
            // Latencies from 1 ms to ~1 hour at 3 significant figures.
            latency: Histogram::new_with_bounds(1, 3_600_000, 3)
                .expect("histogram bounds are static"),
            total_spawned: 0,
            total_completed: 0,
            total_dropped: 0,
            peak_live: 0,
            peak_backlog: 0,
            ticks: 0,
            simulated_millis: 0.0,
        }
    }

    /// Messages spawned over the run.
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Messages fully consumed over the run.
    pub fn total_completed(&self) -> u64 {
        self.total_completed
    }

    /// Messages dropped for lack of an assigned consumer.
    pub fn total_dropped(&self) -> u64 {
        self.total_dropped
    }

    /// Largest live message count observed after any tick.
    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    /// Largest single-partition backlog observed after any tick.
    pub fn peak_backlog(&self) -> u32 {
        self.peak_backlog
    }

    /// Average completions per simulated second.
    pub fn average_throughput(&self) -> f64 {
        if self.simulated_millis <= 0.0 {
            return 0.0;
        }
        self.total_completed as f64 * 1000.0 / self.simulated_millis
    }

    /// Median end-to-end latency in simulated milliseconds.
    pub fn p50_latency_ms(&self) -> u64 {
        self.latency.value_at_quantile(0.50)
    }

    /// 99th percentile end-to-end latency in simulated milliseconds.
    pub fn p99_latency_ms(&self) -> u64 {
        self.latency.value_at_quantile(0.99)
    }

    /// Maximum end-to-end latency in simulated milliseconds.
    pub fn max_latency_ms(&self) -> u64 {
        self.latency.max()
    }

    /// Print a human-readable summary to stdout.
    pub fn print(&self) {
        println!("=== streamsim run report ===");
        println!(
            "ticks:          {} ({:.1} s simulated)",
            self.ticks,
            self.simulated_millis / 1000.0
        );
        println!("spawned:        {}", self.total_spawned);
        println!("completed:      {}", self.total_completed);
        println!("dropped:        {}", self.total_dropped);
        println!("peak live:      {}", self.peak_live);
        println!("peak backlog:   {}", self.peak_backlog);
        println!("avg throughput: {:.2} msg/s", self.average_throughput());
        if self.total_completed > 0 {
            println!(
                "latency ms:     p50={} p99={} max={}",
                self.p50_latency_ms(),
                self.p99_latency_ms(),
                self.max_latency_ms()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = RunReport::new();
        assert_eq!(report.total_completed(), 0);
        assert_eq!(report.average_throughput(), 0.0);
    }

    #[test]
    fn test_average_throughput() {
        let mut report = RunReport::new();
        report.total_completed = 50;
        report.simulated_millis = 10_000.0;
        assert_eq!(report.average_throughput(), 5.0);
    }

    #[test]
    fn test_latency_percentiles() {
        let mut report = RunReport::new();
        for ms in 1..=100u64 {
            report.latency.record(ms).unwrap();
        }
        assert!(report.p50_latency_ms() >= 50 && report.p50_latency_ms() <= 51);
        assert!(report.p99_latency_ms() >= 99);
        assert_eq!(report.max_latency_ms(), 100);
    }
}
