//! Streamsim CLI
//!
//! Drives the cluster flow simulation from the command line and prints a
//! run report.

use clap::Parser;
use streamsim_simulator::{Harness, HarnessConfig};
use streamsim_types::{AckMode, ClusterConfig, Compression};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "streamsim")]
#[command(about = "Flow simulation for a partitioned message-queue cluster")]
#[command(version)]
struct Cli {
    /// Number of brokers (1-10 on the interactive surface)
    #[arg(long, default_value = "3")]
    brokers: u32,

    /// Number of producers
    #[arg(long, default_value = "1")]
    producers: u32,

    /// Number of partitions
    #[arg(long, default_value = "3")]
    partitions: u32,

    /// Replication factor, leader included
    #[arg(long, default_value = "1")]
    replication_factor: u32,

    /// Consumer-group size (0 drops everything at the consuming boundary)
    #[arg(long, default_value = "1")]
    consumers: u32,

    /// Place replicas across racks when possible
    #[arg(long)]
    rack_awareness: bool,

    /// Acknowledgment mode (0, 1, or all)
    #[arg(long, default_value = "1")]
    acks: String,

    /// Producer retry budget
    #[arg(long, default_value = "0")]
    retries: u32,

    /// Producer batch size in bytes
    #[arg(long, default_value = "16384")]
    batch_size: u32,

    /// Compression codec (none, gzip, snappy, lz4, zstd)
    #[arg(long, default_value = "none")]
    compression: String,

    /// Produce rate in messages per second
    #[arg(long, default_value = "10")]
    message_rate: f64,

    /// Consumer-group intake capacity in messages per second
    #[arg(long, default_value = "50")]
    intake_rate: f64,

    /// Number of ticks to simulate
    #[arg(long, default_value = "3600")]
    ticks: u64,

    /// Wall milliseconds per tick
    #[arg(long, default_value = "16.666666")]
    tick_millis: f64,

    /// Simulation speed multiplier
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Random seed
    #[arg(long, default_value = "12345")]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let acks: AckMode = cli.acks.parse()?;
    let compression: Compression = cli.compression.parse()?;

    let cluster = ClusterConfig::new(cli.brokers, cli.partitions)
        .with_producers(cli.producers)
        .with_replication_factor(cli.replication_factor)
        .with_consumer_group_members(cli.consumers)
        .with_rack_awareness(cli.rack_awareness)
        .with_acks(acks)
        .with_retries(cli.retries)
        .with_batch_size_bytes(cli.batch_size)
        .with_compression(compression)
        .with_produce_rate(cli.message_rate)
        .with_consume_intake_rate(cli.intake_rate);

    let config = HarnessConfig::new(cluster)
        .with_ticks(cli.ticks)
        .with_tick_millis(cli.tick_millis)
        .with_speed(cli.speed)
        .with_seed(cli.seed);

    let mut harness = Harness::new(config);

    let topology = harness.simulator().topology();
    for placement in topology.placements() {
        let followers: Vec<String> = placement
            .followers()
            .iter()
            .map(|b| b.to_string())
            .collect();
        println!(
            "{} -> leader {}, followers [{}]",
            placement.partition(),
            placement.leader(),
            followers.join(", ")
        );
    }

    let report = harness.run();
    report.print();

    Ok(())
}
