use statsd_pool::{
    BoxedClient, Client, ClientPool, DogStatsdClient, Metric, MetricResult, StatsdTransport,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording transport shared between the pool member and the test
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct CountCall {
    name: String,
    value: i64,
    rate: f64,
    tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct FloatCall {
    name: String,
    value: f64,
    rate: f64,
    tags: Vec<String>,
}

#[derive(Default)]
struct RecordingTransport {
    counts: Mutex<Vec<CountCall>>,
    gauges: Mutex<Vec<FloatCall>>,
    histograms: Mutex<Vec<FloatCall>>,
    distributions: Mutex<Vec<FloatCall>>,
}

impl RecordingTransport {
    fn total_calls(&self) -> usize {
        self.counts.lock().unwrap().len()
            + self.gauges.lock().unwrap().len()
            + self.histograms.lock().unwrap().len()
            + self.distributions.lock().unwrap().len()
    }
}

fn float_call(name: &str, value: f64, tags: &[String], rate: f64) -> FloatCall {
    FloatCall {
        name: name.to_string(),
        value,
        rate,
        tags: tags.to_vec(),
    }
}

impl StatsdTransport for RecordingTransport {
    fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> MetricResult<()> {
        self.counts.lock().unwrap().push(CountCall {
            name: name.to_string(),
            value,
            rate,
            tags: tags.to_vec(),
        });
        Ok(())
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        self.gauges
            .lock()
            .unwrap()
            .push(float_call(name, value, tags, rate));
        Ok(())
    }

    fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> MetricResult<()> {
        self.histograms
            .lock()
            .unwrap()
            .push(float_call(name, value, tags, rate));
        Ok(())
    }

    fn distribution(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        rate: f64,
    ) -> MetricResult<()> {
        self.distributions
            .lock()
            .unwrap()
            .push(float_call(name, value, tags, rate));
        Ok(())
    }
}

/// Builds a pool of `n` enabled DogStatsD clients, returning their transports.
fn create_pool(n: usize, enabled: bool) -> (ClientPool, Vec<Arc<RecordingTransport>>) {
    let transports: Vec<Arc<RecordingTransport>> = (0..n).map(|_| Arc::default()).collect();
    let pool = transports
        .iter()
        .map(|t| Box::new(DogStatsdClient::with_transport(enabled, Arc::clone(t))) as BoxedClient)
        .collect();
    (pool, transports)
}

fn tags(tag: &str) -> Vec<String> {
    vec![tag.to_string()]
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_pool_push_counts_and_histogram() {
    let (pool, transports) = create_pool(4, true);

    pool.push(&Metric::count("countMetricA", 1.0).with_tag("tag:mytag"));
    pool.push(&Metric::count("countMetricB", 2.0).with_tag("tag:mytagB"));
    pool.push(&Metric::histogram("histogramMetricA", 4.2).with_tag("tag:mytagC"));

    assert_eq!(pool.len(), 4);
    for transport in &transports {
        assert_eq!(transport.total_calls(), 3);
        assert_eq!(
            *transport.counts.lock().unwrap(),
            vec![
                CountCall {
                    name: "countMetricA".into(),
                    value: 1,
                    rate: 1.0,
                    tags: tags("tag:mytag"),
                },
                CountCall {
                    name: "countMetricB".into(),
                    value: 2,
                    rate: 1.0,
                    tags: tags("tag:mytagB"),
                },
            ]
        );
        assert_eq!(
            *transport.histograms.lock().unwrap(),
            vec![float_call("histogramMetricA", 4.2, &tags("tag:mytagC"), 1.0)]
        );
    }
}

#[test]
fn test_pool_push_with_rate_histogram_and_gauge() {
    let (pool, transports) = create_pool(5, true);

    pool.push_with_rate(
        &Metric::histogram("histogramMetricA", 4.2)
            .with_tag("tag:mytagC")
            .with_rate(1.0),
    );
    pool.push_with_rate(
        &Metric::gauge("gaugeMetricA", 7.1)
            .with_tag("tag:mytagD")
            .with_rate(0.8),
    );

    for transport in &transports {
        assert_eq!(transport.total_calls(), 2);
        assert_eq!(
            *transport.histograms.lock().unwrap(),
            vec![float_call("histogramMetricA", 4.2, &tags("tag:mytagC"), 1.0)]
        );
        assert_eq!(
            *transport.gauges.lock().unwrap(),
            vec![float_call("gaugeMetricA", 7.1, &tags("tag:mytagD"), 0.8)]
        );
    }
}

#[test]
fn test_pool_routes_each_kind_once() {
    let (pool, transports) = create_pool(2, true);

    pool.push(&Metric::distribution("distributionMetricA", 1.3).with_tag("tag:mytagE"));

    for transport in &transports {
        assert!(transport.counts.lock().unwrap().is_empty());
        assert!(transport.gauges.lock().unwrap().is_empty());
        assert!(transport.histograms.lock().unwrap().is_empty());
        assert_eq!(
            *transport.distributions.lock().unwrap(),
            vec![float_call("distributionMetricA", 1.3, &tags("tag:mytagE"), 1.0)]
        );
    }
}

#[test]
fn test_pool_of_disabled_clients_sends_nothing() {
    let (pool, transports) = create_pool(3, false);

    for i in 0..10 {
        pool.push(&Metric::count("countMetricA", f64::from(i)));
        pool.push_with_rate(&Metric::gauge("gaugeMetricA", 7.1).with_rate(0.5));
    }

    for transport in &transports {
        assert_eq!(transport.total_calls(), 0);
    }
}

#[test]
fn test_pool_shared_across_threads() {
    let (pool, transports) = create_pool(3, true);
    let pool = Arc::new(pool);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    pool.push(&Metric::count("parallel.count", 1.0));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for transport in &transports {
        assert_eq!(transport.counts.lock().unwrap().len(), 100);
    }
}
