//! # statsd-pool
//!
//! A fire-and-forget metrics facade for statsd-compatible backends.
//!
//! ## Features
//!
//! - **One interface**: counters, gauges, histograms and distributions through
//!   the [`Client`] trait, with or without a client-side sampling rate
//! - **Fan-out**: [`ClientPool`] broadcasts every push to all configured backends
//! - **Environment-driven**: backends are configured from `DOGSTATSD_*` variables,
//!   and misconfiguration degrades to a silent no-op instead of an error
//! - **Never in the way**: pushes cannot fail or panic; dropped metrics are
//!   visible through per-client telemetry counters and `tracing` events
//!
//! ## Quick Start
//!
//! ```no_run
//! use statsd_pool::{new_client_from_env, Client, Metric};
//!
//! // DOGSTATSD_ENABLED=true DOGSTATSD_HOST=127.0.0.1 DOGSTATSD_PORT=8125
//! let client = new_client_from_env();
//!
//! client.push(&Metric::count("request.count", 1.0).with_tag("endpoint:api"));
//! client.push(&Metric::gauge("connections.active", 100.0).with_tag("pool:main"));
//! client.push_with_rate(&Metric::histogram("request.latency", 42.0).with_rate(0.5));
//! client.push(&Metric::distribution("payload.size", 1024.0));
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

// https://docs.datadoghq.com/developers/dogstatsd/datagram_shell/?tab=metrics
mod backend;
mod client;
mod config;
mod dogstats;
mod error;
mod metric;
mod pool;

pub use backend::BackendKind;
pub use client::{BoxedClient, Client};
pub use config::{
    DogStatsdConfig, PoolConfig, DEFAULT_HOST, DEFAULT_PORT, DOGSTATSD_ENABLED, DOGSTATSD_HOST,
    DOGSTATSD_PORT,
};
pub use dogstats::telemetry::{ClientTelemetry, TelemetrySnapshot};
pub use dogstats::transport::StatsdTransport;
pub use dogstats::writer::{
    StatsdWriter, UdpSocketWriter, UdpTransport, Writer, DEFAULT_MAX_PACKET_SIZE,
};
pub use dogstats::DogStatsdClient;
pub use error::MetricsError;
pub use metric::{Metric, MetricKind, RatedMetric};
pub use pool::{BackendFailure, ClientPool};

/// Result type for metric operations.
///
/// Wraps errors that can occur while building backends and sending metrics.
pub type MetricResult<T> = Result<T, MetricsError>;

/// Builds a client fanning out to every backend configured in `config`.
///
/// Never fails: backends that cannot be built are left out.
#[must_use]
pub fn new_client(config: &PoolConfig) -> ClientPool {
    ClientPool::from_config(config)
}

/// Builds a client fanning out to every backend configured in the environment.
#[must_use]
pub fn new_client_from_env() -> ClientPool {
    ClientPool::from_env()
}

/// Builds a single backend client by name.
///
/// # Errors
/// Returns [`MetricsError::UnsupportedBackend`] for an unknown `name`, or the
/// backend's construction error when its transport cannot be created.
pub fn new_backend_client(name: &str, config: &PoolConfig) -> MetricResult<BoxedClient> {
    name.parse::<BackendKind>()?.build(config)
}
