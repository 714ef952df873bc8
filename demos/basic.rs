//! Basic usage of all four metric kinds through a pool built from explicit
//! configuration.
//!
//! Run with: `cargo run --example basic`

use statsd_pool::{new_client, Client, DogStatsdConfig, Metric, PoolConfig};

fn main() {
    let config = PoolConfig {
        dogstatsd: DogStatsdConfig {
            enabled: true,
            // empty host and zero port fall back to localhost:8125
            host: String::new(),
            port: 0,
        },
    };
    let client = new_client(&config);

    for failure in client.failed_backends() {
        eprintln!("{} backend unavailable: {}", failure.kind, failure.error);
    }

    // Histogram: a sample aggregated per reporting process
    client.push(
        &Metric::histogram("request.latency", 42.0).with_tags(["endpoint:api", "method:get"]),
    );

    // Counter: whole-number increment
    client.push(&Metric::count("request.count", 1.0).with_tag("endpoint:api"));

    // Gauge: point-in-time value
    client.push(&Metric::gauge("connections.active", 100.0).with_tag("pool:main"));

    // Distribution: aggregated globally by the agent
    client.push(&Metric::distribution("payload.size", 1024.0));

    // Sampled counter: one report stands for ten occurrences
    client.push_with_rate(&Metric::count("cache.miss", 1.0).with_rate(0.1));

    println!("pushed metrics to {} backend(s)", client.len());
}
