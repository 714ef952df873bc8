use statsd_pool::{
    new_backend_client, new_client, Client, DogStatsdConfig, Metric, MetricKind, MetricsError,
    PoolConfig,
};
use std::net::UdpSocket;
use std::time::Duration;

/// Binds a loopback receiver on an ephemeral port.
fn bind_receiver(timeout: Duration) -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("couldn't bind to address");
    socket
        .set_read_timeout(Some(timeout))
        .expect("set_read_timeout failed");
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

/// Collects datagrams until the read timeout expires.
fn collect(socket: &UdpSocket) -> Vec<String> {
    let mut buf = [0; 2048];
    let mut received = Vec::new();
    while let Ok((n, _)) = socket.recv_from(&mut buf) {
        received.push(String::from_utf8(buf[..n].to_vec()).unwrap());
    }
    received
}

fn pool_config(enabled: bool, port: u16) -> PoolConfig {
    PoolConfig {
        dogstatsd: DogStatsdConfig {
            enabled,
            host: "127.0.0.1".to_string(),
            port: port.into(),
        },
    }
}

#[test]
fn test_enabled_pool_sends_dogstatsd_lines() {
    let (receiver, port) = bind_receiver(Duration::from_millis(500));
    let client = new_client(&pool_config(true, port));

    client.push(&Metric::count("countMetricA", 1.0).with_tag("tag:mytag"));
    client.push_with_rate(
        &Metric::gauge("gaugeMetricA", 7.1)
            .with_tags(["tag:mytagD", "env:test"])
            .with_rate(0.8),
    );
    client.push(&Metric::histogram("histogramMetricA", 4.2));
    client.push_with_rate(&Metric::distribution("distributionMetricA", 1.3).with_rate(0.5));
    client.push(&Metric::new("unknownMetric", MetricKind::Unrecognized(7), 1.0));

    let received = collect(&receiver);
    assert_eq!(
        received,
        vec![
            "countMetricA:1|c|#tag:mytag\n",
            "gaugeMetricA:7.1|g|@0.8|#tag:mytagD,env:test\n",
            "histogramMetricA:4.2|h\n",
            "distributionMetricA:1.3|d|@0.5\n",
        ]
    );
}

#[test]
fn test_disabled_pool_sends_nothing() {
    let (receiver, port) = bind_receiver(Duration::from_millis(300));
    let client = new_client(&pool_config(false, port));

    assert_eq!(client.len(), 1);
    client.push(&Metric::count("countMetricA", 1.0));
    client.push_with_rate(&Metric::histogram("histogramMetricA", 4.2).with_rate(0.2));

    assert!(collect(&receiver).is_empty());
}

#[test]
fn test_named_backend_client() {
    let (receiver, port) = bind_receiver(Duration::from_millis(500));
    let client = new_backend_client("DataDog", &pool_config(true, port)).unwrap();

    client.push(&Metric::count("named.client", 3.0));

    assert_eq!(collect(&receiver), vec!["named.client:3|c\n"]);
}

#[test]
fn test_unknown_backend_name_is_rejected() {
    let result = new_backend_client("graphite", &PoolConfig::default());

    assert!(matches!(result, Err(MetricsError::UnsupportedBackend(name)) if name == "graphite"));
}
