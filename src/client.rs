use std::sync::Arc;

use crate::metric::{Metric, RatedMetric};

/// A metrics client: anything that accepts measurements and forwards them
/// somewhere.
///
/// Pushes never fail and never report success. A client that cannot or should
/// not deliver a metric drops it.
pub trait Client {
    /// Pushes a metric at full weight, the same as a rate of `1.0`.
    fn push(&self, metric: &Metric);

    /// Pushes a metric carrying the sampling rate already applied by the caller.
    fn push_with_rate(&self, rated_metric: &RatedMetric);
}

impl<T> Client for Box<T>
where
    T: Client + ?Sized,
{
    fn push(&self, metric: &Metric) {
        (**self).push(metric);
    }

    fn push_with_rate(&self, rated_metric: &RatedMetric) {
        (**self).push_with_rate(rated_metric);
    }
}

impl<T> Client for Arc<T>
where
    T: Client + ?Sized,
{
    fn push(&self, metric: &Metric) {
        (**self).push(metric);
    }

    fn push_with_rate(&self, rated_metric: &RatedMetric) {
        (**self).push_with_rate(rated_metric);
    }
}

/// Owned, thread-safe client handle as stored by the pool.
pub type BoxedClient = Box<dyn Client + Send + Sync>;
