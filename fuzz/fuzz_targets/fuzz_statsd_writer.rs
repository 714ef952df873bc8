#![no_main]

use libfuzzer_sys::fuzz_target;
use statsd_pool::{
    Client, DogStatsdClient, Metric, MetricKind, StatsdWriter, Writer,
};
use std::cell::RefCell;

const MAX_PACKET_SIZE: usize = 256;

struct CheckingWriter {
    written: RefCell<usize>,
}

impl Writer for CheckingWriter {
    fn write(&self, buf: &[u8]) -> std::io::Result<usize> {
        assert!(buf.len() <= MAX_PACKET_SIZE, "datagram over the packet limit");
        assert_eq!(buf.last(), Some(&b'\n'));
        *self.written.borrow_mut() += 1;
        Ok(buf.len())
    }
}

// Arbitrary names, tags, values, rates and kind codes must never panic and
// never produce a datagram over the limit.
fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }

    let kind = MetricKind::from_code(data[0] % 6);
    let value = f64::from_le_bytes(data[1..9].try_into().unwrap());
    let rate = f64::from(data[9]) / 255.0;
    let text = String::from_utf8_lossy(&data[10..]);

    let mut parts = text.split('\u{0}');
    let name = parts.next().unwrap_or_default().to_string();
    let metric = Metric::new(name, kind, value).with_tags(parts.map(str::to_string));

    let client = DogStatsdClient::with_transport(
        true,
        StatsdWriter::new(CheckingWriter {
            written: RefCell::new(0),
        })
        .with_max_packet_size(MAX_PACKET_SIZE),
    );

    client.push(&metric);
    client.push_with_rate(&metric.with_rate(rate));

    let snapshot = client.telemetry().snapshot();
    assert_eq!(
        snapshot.forwarded + snapshot.dropped_unrecognized + snapshot.transport_errors,
        2
    );
    assert_eq!(
        *client.transport().writer().written.borrow() as u64,
        snapshot.forwarded
    );
});
