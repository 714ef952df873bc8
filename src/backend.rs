use std::fmt;
use std::str::FromStr;

use crate::client::BoxedClient;
use crate::config::PoolConfig;
use crate::dogstats::DogStatsdClient;
use crate::{MetricResult, MetricsError};

/// Every backend this crate can build.
///
/// Supporting a new backend means adding a variant here and a constructor arm
/// in [`BackendKind::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// A DogStatsD agent reached over UDP.
    DataDog,
}

impl BackendKind {
    /// All supported backends, in pool construction order.
    pub const ALL: [Self; 1] = [Self::DataDog];

    /// Canonical backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DataDog => "DataDog",
        }
    }

    /// Builds a client for this backend from its section of `config`.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` when the backend transport cannot be created.
    /// A backend disabled by configuration is still built.
    pub fn build(self, config: &PoolConfig) -> MetricResult<BoxedClient> {
        match self {
            Self::DataDog => Ok(Box::new(DogStatsdClient::new(&config.dogstatsd)?)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("datadog") || s.eq_ignore_ascii_case("dogstatsd") {
            Ok(Self::DataDog)
        } else {
            Err(MetricsError::UnsupportedBackend(s.to_string()))
        }
    }
}
