use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a backend client did with the metrics it was given.
///
/// Pushes never report errors, so this is the only place dropped metrics
/// become visible.
#[derive(Debug, Default)]
pub struct ClientTelemetry {
    forwarded: AtomicU64,
    dropped_disabled: AtomicU64,
    dropped_unrecognized: AtomicU64,
    transport_errors: AtomicU64,
}

/// Point-in-time copy of a [`ClientTelemetry`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Metrics handed to the transport successfully.
    pub forwarded: u64,
    /// Metrics ignored because the client is disabled.
    pub dropped_disabled: u64,
    /// Metrics discarded because their kind is unrecognized.
    pub dropped_unrecognized: u64,
    /// Metrics the transport failed to encode or send.
    pub transport_errors: u64,
}

impl ClientTelemetry {
    pub(crate) fn record_forwarded(&self) {
        self.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped_disabled(&self) {
        self.dropped_disabled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped_unrecognized(&self) {
        self.dropped_unrecognized.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads every counter.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            forwarded: self.forwarded.load(Ordering::Relaxed),
            dropped_disabled: self.dropped_disabled.load(Ordering::Relaxed),
            dropped_unrecognized: self.dropped_unrecognized.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
        }
    }
}
