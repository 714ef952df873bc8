use std::sync::Arc;

use crate::MetricResult;

/// The statsd calls a backend client forwards metrics to.
///
/// Implementations own the wire encoding and the delivery of each metric.
/// `rate` is the client-side sampling rate already applied by the caller and
/// must be passed to the backend unchanged; `tags` are opaque and ordered.
pub trait StatsdTransport {
    /// Sends an integer counter increment.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` if the metric cannot be encoded or sent.
    fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> MetricResult<()>;

    /// Sends an instantaneous gauge value.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` if the metric cannot be encoded or sent.
    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()>;

    /// Sends a histogram sample.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` if the metric cannot be encoded or sent.
    fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()>;

    /// Sends a distribution sample, aggregated globally by the agent.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` if the metric cannot be encoded or sent.
    fn distribution(&self, name: &str, value: f64, tags: &[String], rate: f64)
        -> MetricResult<()>;
}

impl<T> StatsdTransport for Arc<T>
where
    T: StatsdTransport + ?Sized,
{
    fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> MetricResult<()> {
        (**self).count(name, value, tags, rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        (**self).gauge(name, value, tags, rate)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        (**self).histogram(name, value, tags, rate)
    }

    fn distribution(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        rate: f64,
    ) -> MetricResult<()> {
        (**self).distribution(name, value, tags, rate)
    }
}
