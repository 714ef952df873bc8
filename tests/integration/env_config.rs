use statsd_pool::{
    new_client_from_env, Client, Metric, DOGSTATSD_ENABLED, DOGSTATSD_HOST, DOGSTATSD_PORT,
};
use std::net::UdpSocket;
use std::time::Duration;

fn receive_all(socket: &UdpSocket) -> Vec<String> {
    let mut buf = [0; 2048];
    let mut received = Vec::new();
    while let Ok((n, _)) = socket.recv_from(&mut buf) {
        received.push(String::from_utf8(buf[..n].to_vec()).unwrap());
    }
    received
}

// This is the only test touching DOGSTATSD_* variables; everything else builds
// its configuration explicitly.
#[test]
fn test_enabled_flag_is_fixed_at_construction() {
    let receiver = UdpSocket::bind("127.0.0.1:0").expect("couldn't bind to address");
    receiver
        .set_read_timeout(Some(Duration::from_millis(300)))
        .expect("set_read_timeout failed");
    let port = receiver.local_addr().unwrap().port();

    std::env::set_var(DOGSTATSD_ENABLED, "false");
    std::env::set_var(DOGSTATSD_HOST, "127.0.0.1");
    std::env::set_var(DOGSTATSD_PORT, port.to_string());

    let disabled = new_client_from_env();
    disabled.push(&Metric::count("before.toggle", 1.0));

    std::env::set_var(DOGSTATSD_ENABLED, "true");
    disabled.push(&Metric::count("after.toggle", 1.0));
    disabled.push_with_rate(&Metric::gauge("after.toggle.gauge", 2.0).with_rate(0.5));

    assert_eq!(disabled.len(), 1);
    assert!(receive_all(&receiver).is_empty());

    let enabled = new_client_from_env();
    enabled.push(&Metric::count("rebuilt", 1.0));

    assert_eq!(receive_all(&receiver), vec!["rebuilt:1|c\n"]);

    std::env::remove_var(DOGSTATSD_ENABLED);
    std::env::remove_var(DOGSTATSD_HOST);
    std::env::remove_var(DOGSTATSD_PORT);
}
