use std::ops::Deref;

/// The kind of a metric, selecting which statsd call it is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Integer counter increment.
    Count,
    /// Instantaneous floating-point value.
    Gauge,
    /// Sample aggregated into a (possibly client-local) histogram.
    Histogram,
    /// Sample aggregated globally by the backend.
    Distribution,
    /// A raw kind code with no known mapping. Metrics of this kind are
    /// discarded at push time.
    Unrecognized(u8),
}

impl MetricKind {
    /// Maps a numeric kind code to a `MetricKind`.
    ///
    /// `0..=3` map to `Count`, `Gauge`, `Histogram`, `Distribution`; any other
    /// code yields `Unrecognized(code)`.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Count,
            1 => Self::Gauge,
            2 => Self::Histogram,
            3 => Self::Distribution,
            other => Self::Unrecognized(other),
        }
    }

    /// Numeric code of this kind, the inverse of [`MetricKind::from_code`].
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Count => 0,
            Self::Gauge => 1,
            Self::Histogram => 2,
            Self::Distribution => 3,
            Self::Unrecognized(code) => code,
        }
    }
}

/// A single measurement event.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Metric name; the allowed charset is defined by the backend.
    pub name: String,
    /// Which kind of statsd metric this is.
    pub kind: MetricKind,
    /// Measured value. Counts are truncated to an integer when forwarded.
    pub value: f64,
    /// Opaque `key:value` style tags, forwarded verbatim and in order.
    pub tags: Vec<String>,
}

impl Metric {
    /// Creates a metric without tags.
    pub fn new(name: impl Into<String>, kind: MetricKind, value: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            tags: Vec::new(),
        }
    }

    /// Creates a `Count` metric.
    pub fn count(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricKind::Count, value)
    }

    /// Creates a `Gauge` metric.
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricKind::Gauge, value)
    }

    /// Creates a `Histogram` metric.
    pub fn histogram(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricKind::Histogram, value)
    }

    /// Creates a `Distribution` metric.
    pub fn distribution(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricKind::Distribution, value)
    }

    /// Appends a single tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Appends every tag from `tags`, keeping their order.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Wraps this metric with a client-side sampling rate.
    #[must_use]
    pub const fn with_rate(self, rate: f64) -> RatedMetric {
        RatedMetric::new(self, rate)
    }
}

/// A [`Metric`] carrying the sampling rate the caller already applied.
///
/// A rate of `r` means the measurement stands for `1/r` occurrences; `1.0`
/// means unsampled.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedMetric {
    /// The measurement itself.
    pub metric: Metric,
    /// Sampling rate in `(0, 1]`, forwarded verbatim to the transport.
    pub rate: f64,
}

impl RatedMetric {
    /// Rate used for metrics pushed without an explicit rate.
    pub const UNSAMPLED: f64 = 1.0;

    /// Creates a rated metric.
    #[must_use]
    pub const fn new(metric: Metric, rate: f64) -> Self {
        Self { metric, rate }
    }
}

impl From<Metric> for RatedMetric {
    fn from(metric: Metric) -> Self {
        Self::new(metric, Self::UNSAMPLED)
    }
}

impl Deref for RatedMetric {
    type Target = Metric;

    fn deref(&self) -> &Metric {
        &self.metric
    }
}
