use crate::{MetricResult, MetricsError};

/// Environment variable enabling the DogStatsD backend.
pub const DOGSTATSD_ENABLED: &str = "DOGSTATSD_ENABLED";
/// Environment variable holding the DogStatsD agent host.
pub const DOGSTATSD_HOST: &str = "DOGSTATSD_HOST";
/// Environment variable holding the DogStatsD agent port.
pub const DOGSTATSD_PORT: &str = "DOGSTATSD_PORT";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";
/// Well-known statsd port used when none is configured.
pub const DEFAULT_PORT: u16 = 8125;

/// Configuration of the DogStatsD backend.
///
/// Empty `host` and zero `port` stand for "not configured" and are replaced by
/// [`DEFAULT_HOST`] and [`DEFAULT_PORT`] when the backend is built. Any other
/// `port` outside `1..=65535` makes the backend fail to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogStatsdConfig {
    /// Whether pushes are forwarded at all.
    pub enabled: bool,
    /// Agent host name or IP literal.
    pub host: String,
    /// Agent UDP port, as configured.
    pub port: i64,
}

impl DogStatsdConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Unparsable values fall back to their defaults instead of failing. A port
    /// that parses as an integer is kept as is, even when out of range.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(DOGSTATSD_ENABLED)
            .and_then(|value| parse_bool(&value))
            .unwrap_or(false);
        let host = lookup(DOGSTATSD_HOST).unwrap_or_default();
        let port = lookup(DOGSTATSD_PORT)
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(0);

        Self {
            enabled,
            host,
            port,
        }
    }

    /// Host with the default substituted when empty.
    #[must_use]
    pub fn resolved_host(&self) -> &str {
        if self.host.is_empty() {
            DEFAULT_HOST
        } else {
            &self.host
        }
    }

    /// Port with the default substituted when zero.
    ///
    /// # Errors
    /// Returns [`MetricsError::InvalidPort`] when the configured port is
    /// neither zero nor a valid UDP port.
    pub fn resolved_port(&self) -> MetricResult<u16> {
        match self.port {
            0 => Ok(DEFAULT_PORT),
            port => u16::try_from(port).map_err(|_| MetricsError::InvalidPort(port)),
        }
    }
}

/// Configuration for every supported backend, resolved at one point and then
/// passed explicitly to the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// DogStatsD backend settings.
    pub dogstatsd: DogStatsdConfig,
}

impl PoolConfig {
    /// Reads every backend configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every backend configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            dogstatsd: DogStatsdConfig::from_lookup(lookup),
        }
    }
}

// Anything outside these spellings is treated as unset.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
