use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use crate::dogstats::transport::StatsdTransport;
use crate::{MetricResult, MetricsError};

/// Largest datagram written by default; fits a 1500 byte MTU after headers.
pub const DEFAULT_MAX_PACKET_SIZE: usize = 1432;

/// Byte sink receiving one serialized datagram per call.
pub trait Writer {
    /// Writes a whole datagram.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the datagram cannot be sent.
    fn write(&self, buf: &[u8]) -> std::io::Result<usize>;
}

impl<T> Writer for &T
where
    T: Writer,
{
    fn write(&self, buf: &[u8]) -> std::io::Result<usize> {
        (*self).write(buf)
    }
}

/// Sends datagrams to a fixed destination from an ephemeral UDP socket.
#[derive(Debug)]
pub struct UdpSocketWriter {
    sock: UdpSocket,
    destination_addr: SocketAddr,
}

impl UdpSocketWriter {
    /// Resolves `host:port` and binds a local socket of the same address family.
    ///
    /// IPv4 results are preferred over IPv6 ones; the chosen address is used for
    /// the lifetime of the writer.
    ///
    /// # Errors
    /// Returns [`MetricsError::AddressResolution`] or [`MetricsError::NoAddress`]
    /// when the address cannot be resolved, and [`MetricsError::StdIo`] when the
    /// local socket cannot be bound.
    pub fn connect(host: &str, port: u16) -> MetricResult<Self> {
        let address = format!("{host}:{port}");
        let candidates: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| MetricsError::AddressResolution {
                address: address.clone(),
                source,
            })?
            .collect();
        let destination_addr = candidates
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| candidates.first())
            .copied()
            .ok_or(MetricsError::NoAddress(address))?;

        let bind_addr: SocketAddr = if destination_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let sock = UdpSocket::bind(bind_addr)?;

        Ok(Self {
            sock,
            destination_addr,
        })
    }

    /// Address every datagram is sent to.
    #[must_use]
    pub const fn destination(&self) -> SocketAddr {
        self.destination_addr
    }
}

impl Writer for UdpSocketWriter {
    fn write(&self, buf: &[u8]) -> std::io::Result<usize> {
        let r = self.sock.send_to(buf, self.destination_addr);
        if let Err(ref err) = r {
            tracing::debug!("UDP send error: {err}");
        }
        r
    }
}

#[derive(Clone, Copy)]
enum MetricType {
    Count,
    Gauge,
    Histogram,
    Distribution,
}

impl MetricType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "c",
            Self::Gauge => "g",
            Self::Histogram => "h",
            Self::Distribution => "d",
        }
    }
}

/// [`StatsdTransport`] serializing each metric as one DogStatsD line:
///
/// ```text
/// name:value|type[|@rate][|#tag1,tag2]
/// ```
///
/// The sample rate section is left out for unsampled metrics.
pub struct StatsdWriter<W> {
    writer: W,
    max_packet_size: usize,
}

/// DogStatsD over UDP.
pub type UdpTransport = StatsdWriter<UdpSocketWriter>;

impl UdpTransport {
    /// Builds a UDP transport targeting `host:port`.
    ///
    /// # Errors
    /// Returns `MetricResult::Err` when the address cannot be resolved or the
    /// local socket cannot be bound.
    pub fn connect(host: &str, port: u16) -> MetricResult<Self> {
        UdpSocketWriter::connect(host, port).map(Self::new)
    }

    /// Address the transport sends to.
    #[must_use]
    pub const fn destination(&self) -> SocketAddr {
        self.writer.destination()
    }
}

impl<W: Writer> StatsdWriter<W> {
    /// Wraps `writer` with the default packet size limit.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
        }
    }

    /// Overrides the largest datagram this writer will emit.
    #[must_use]
    pub const fn with_max_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    /// The underlying byte sink.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn write_metric(
        &self,
        name: &str,
        value: &str,
        metric_type: MetricType,
        tags: &[String],
        rate: f64,
    ) -> MetricResult<()> {
        let mut rate_buffer = ryu::Buffer::new();
        #[allow(clippy::float_cmp)]
        let rate = if rate == 1.0 {
            None
        } else {
            Some(rate_buffer.format(rate))
        };

        let metric_type = metric_type.as_str();
        let metric_len = metric_len(name, value, metric_type, rate, tags);
        if metric_len > self.max_packet_size {
            return Err(MetricsError::PacketTooLarge {
                len: metric_len,
                max: self.max_packet_size,
            });
        }

        let mut line = String::with_capacity(metric_len);
        line.push_str(name);
        line.push(':');
        line.push_str(value);
        line.push('|');
        line.push_str(metric_type);
        if let Some(rate) = rate {
            line.push_str("|@");
            line.push_str(rate);
        }
        let mut tags_iter = tags.iter();
        if let Some(tag) = tags_iter.next() {
            line.push_str("|#");
            line.push_str(tag);
            for tag in tags_iter {
                line.push(',');
                line.push_str(tag);
            }
        }
        line.push('\n');

        self.writer.write(line.as_bytes())?;
        Ok(())
    }

    fn write_float(
        &self,
        name: &str,
        value: f64,
        metric_type: MetricType,
        tags: &[String],
        rate: f64,
    ) -> MetricResult<()> {
        if !value.is_finite() {
            return Err(format!("Non-finite value {value} for metric {name}").into());
        }
        let mut buffer = ryu::Buffer::new();
        self.write_metric(name, buffer.format_finite(value), metric_type, tags, rate)
    }
}

#[inline]
fn metric_len(
    name: &str,
    value: &str,
    metric_type: &str,
    rate: Option<&str>,
    tags: &[String],
) -> usize {
    // name:value|type\n
    let mut metric_len = name.len() + value.len() + metric_type.len() + 3;

    if let Some(rate) = rate {
        metric_len += rate.len() + 2; // '|@'
    }

    if !tags.is_empty() {
        metric_len += 2; // '|#'
        metric_len += tags.iter().map(String::len).sum::<usize>();
        metric_len += tags.len() - 1; // ','
    }
    metric_len
}

impl<W: Writer> StatsdTransport for StatsdWriter<W> {
    fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> MetricResult<()> {
        let mut buffer = itoa::Buffer::new();
        self.write_metric(name, buffer.format(value), MetricType::Count, tags, rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        self.write_float(name, value, MetricType::Gauge, tags, rate)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        self.write_float(name, value, MetricType::Histogram, tags, rate)
    }

    fn distribution(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        rate: f64,
    ) -> MetricResult<()> {
        self.write_float(name, value, MetricType::Distribution, tags, rate)
    }
}
