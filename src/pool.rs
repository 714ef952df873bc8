use std::fmt;

use tracing::{debug, warn};

use crate::backend::BackendKind;
use crate::client::{BoxedClient, Client};
use crate::config::PoolConfig;
use crate::metric::{Metric, RatedMetric};
use crate::MetricsError;

/// A backend that could not be built while assembling a pool.
#[derive(Debug)]
pub struct BackendFailure {
    /// Which backend failed.
    pub kind: BackendKind,
    /// Why it failed.
    pub error: MetricsError,
}

/// Fan-out client broadcasting every push to each of its members.
///
/// Members are fixed at construction and called one after the other, in
/// order, on the calling thread. An empty pool is valid and drops everything.
///
/// # Example
///
/// ```no_run
/// use statsd_pool::{Client, ClientPool, Metric, PoolConfig};
///
/// let pool = ClientPool::from_config(&PoolConfig::from_env());
///
/// pool.push(&Metric::count("requests", 1.0).with_tag("endpoint:api"));
/// pool.push_with_rate(&Metric::histogram("latency", 12.5).with_rate(0.1));
/// ```
#[derive(Default)]
pub struct ClientPool {
    clients: Vec<BoxedClient>,
    failed: Vec<BackendFailure>,
}

impl ClientPool {
    /// Creates a pool over the given members.
    #[must_use]
    pub fn new(clients: Vec<BoxedClient>) -> Self {
        Self {
            clients,
            failed: Vec::new(),
        }
    }

    /// Builds every supported backend from `config`.
    ///
    /// Backends that fail to build are left out of the pool and reported
    /// through [`ClientPool::failed_backends`]; this never fails.
    #[must_use]
    pub fn from_config(config: &PoolConfig) -> Self {
        let mut clients = Vec::with_capacity(BackendKind::ALL.len());
        let mut failed = Vec::new();

        for kind in BackendKind::ALL {
            match kind.build(config) {
                Ok(client) => clients.push(client),
                Err(error) => {
                    warn!("Fail to build {kind} metrics client: {error}");
                    failed.push(BackendFailure { kind, error });
                }
            }
        }

        debug!(
            members = clients.len(),
            failed = failed.len(),
            "metrics client pool built"
        );
        Self { clients, failed }
    }

    /// Builds every supported backend from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&PoolConfig::from_env())
    }

    /// Number of member clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the pool has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Backends left out because they could not be built.
    #[must_use]
    pub fn failed_backends(&self) -> &[BackendFailure] {
        &self.failed
    }
}

impl Client for ClientPool {
    fn push(&self, metric: &Metric) {
        for client in &self.clients {
            client.push(metric);
        }
    }

    fn push_with_rate(&self, rated_metric: &RatedMetric) {
        for client in &self.clients {
            client.push_with_rate(rated_metric);
        }
    }
}

impl fmt::Debug for ClientPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientPool")
            .field("members", &self.clients.len())
            .field("failed", &self.failed)
            .finish()
    }
}

impl FromIterator<BoxedClient> for ClientPool {
    fn from_iter<I: IntoIterator<Item = BoxedClient>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
