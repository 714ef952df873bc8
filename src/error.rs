use thiserror::Error;

/// Errors that can occur while building a backend or serializing a metric.
///
/// None of these ever reach a push caller: the push paths log and count them
/// instead of returning them.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A custom error with a free-form message.
    #[error("Custom error: {0}")]
    Custom(String),

    /// An I/O error from the standard library.
    #[error("Std Io error: {0}")]
    StdIo(#[from] std::io::Error),

    /// The backend address could not be resolved.
    #[error("Cannot resolve statsd address {address}: {source}")]
    AddressResolution {
        /// The `host:port` that was looked up.
        address: String,
        /// The underlying resolver error.
        source: std::io::Error,
    },

    /// The configured port does not fit a UDP port.
    #[error("Invalid statsd port: {0}")]
    InvalidPort(i64),

    /// Address resolution succeeded but yielded nothing to send to.
    #[error("No address found for {0}")]
    NoAddress(String),

    /// The requested backend is not one this crate knows how to build.
    #[error("Unsupported metrics backend: {0}")]
    UnsupportedBackend(String),

    /// A serialized metric does not fit in a single datagram.
    #[error("Metric is larger than {max} bytes ({len})")]
    PacketTooLarge {
        /// Length of the serialized metric line.
        len: usize,
        /// Configured packet limit.
        max: usize,
    },
}

impl From<String> for MetricsError {
    fn from(value: String) -> Self {
        Self::Custom(value)
    }
}

impl From<&str> for MetricsError {
    fn from(value: &str) -> Self {
        Self::Custom(value.to_string())
    }
}
