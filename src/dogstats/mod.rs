use tracing::{debug, trace, warn};

use crate::client::Client;
use crate::config::DogStatsdConfig;
use crate::metric::{Metric, MetricKind, RatedMetric};
use crate::MetricResult;

pub mod telemetry;
pub mod transport;
pub mod writer;

use telemetry::ClientTelemetry;
use transport::StatsdTransport;
use writer::UdpTransport;

/// Backend client forwarding metrics to a DogStatsD agent.
///
/// The enabled flag is fixed at construction. A disabled client is still a
/// valid client: every push on it is a silent no-op.
pub struct DogStatsdClient<T = UdpTransport> {
    enabled: bool,
    transport: T,
    telemetry: ClientTelemetry,
}

impl DogStatsdClient<UdpTransport> {
    /// Builds a UDP client from `config`, substituting `localhost` for an empty
    /// host and `8125` for a zero port.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` when the port is out of range or the
    /// resolved address cannot be turned into a UDP transport. Being disabled
    /// is not an error.
    pub fn new(config: &DogStatsdConfig) -> MetricResult<Self> {
        let transport = UdpTransport::connect(config.resolved_host(), config.resolved_port()?)?;
        debug!(
            enabled = config.enabled,
            destination = %transport.destination(),
            "DogStatsD client created"
        );
        Ok(Self::with_transport(config.enabled, transport))
    }
}

impl<T: StatsdTransport> DogStatsdClient<T> {
    /// Builds a client around an existing transport.
    pub fn with_transport(enabled: bool, transport: T) -> Self {
        Self {
            enabled,
            transport,
            telemetry: ClientTelemetry::default(),
        }
    }

    /// Whether pushes reach the transport.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The transport metrics are forwarded to.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Counters of forwarded and dropped metrics.
    pub const fn telemetry(&self) -> &ClientTelemetry {
        &self.telemetry
    }

    fn send(&self, metric: &Metric, rate: f64) {
        if !self.enabled {
            self.telemetry.record_dropped_disabled();
            return;
        }

        let Metric {
            name,
            kind,
            value,
            tags,
        } = metric;

        let result = match *kind {
            // Fractional counts are truncated toward zero.
            #[allow(clippy::cast_possible_truncation)]
            MetricKind::Count => self.transport.count(name, *value as i64, tags, rate),
            MetricKind::Gauge => self.transport.gauge(name, *value, tags, rate),
            MetricKind::Histogram => self.transport.histogram(name, *value, tags, rate),
            MetricKind::Distribution => self.transport.distribution(name, *value, tags, rate),
            MetricKind::Unrecognized(code) => {
                self.telemetry.record_dropped_unrecognized();
                debug!(metric = %name, code, "discarding metric of unrecognized kind");
                return;
            }
        };

        match result {
            Ok(()) => {
                self.telemetry.record_forwarded();
                trace!(metric = %name, ?kind, rate, "metric forwarded");
            }
            Err(err) => {
                self.telemetry.record_transport_error();
                warn!("Fail to send metric {name}: {err}");
            }
        }
    }
}

impl<T: StatsdTransport> Client for DogStatsdClient<T> {
    fn push(&self, metric: &Metric) {
        self.send(metric, RatedMetric::UNSAMPLED);
    }

    fn push_with_rate(&self, rated_metric: &RatedMetric) {
        self.send(&rated_metric.metric, rated_metric.rate);
    }
}
