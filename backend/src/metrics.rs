use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::registry::Registry;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Data, Request, Response};
use time::OffsetDateTime;
use crate::request_log::RequestTimer;

pub const HTTP_DURATION_BUCKETS: [f64; 8] = [0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0];

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: String,
    pub route: String,
    pub status_code: String,
}

/// Registry behind `GET /metrics`.
///
/// Recording only needs `&self`; share it through an `Arc`.
pub struct Metrics {
    registry: Registry,
    pub http_request_duration: Family<HttpLabels, Histogram>,
    pub votes_stored: Gauge,
    pub save_failures: Counter,
    pub process_start_time: Gauge<f64, AtomicU64>,
    pub process_resident_memory: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_request_duration = Family::<HttpLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(HTTP_DURATION_BUCKETS.into_iter())
        });
        registry.register(
            "http_request_duration_seconds",
            "Duration of HTTP requests in seconds",
            http_request_duration.clone(),
        );

        let votes_stored = Gauge::default();
        registry.register(
            "votes_stored",
            "Number of votes currently held by the store",
            votes_stored.clone(),
        );

        let save_failures = Counter::default();
        registry.register(
            "vote_store_save_failures",
            "Vote mutations rejected because the data file could not be written",
            save_failures.clone(),
        );

        let process_start_time: Gauge<f64, AtomicU64> = Gauge::default();
        process_start_time.set(OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9);
        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            process_start_time.clone(),
        );

        let process_resident_memory = Gauge::default();
        registry.register(
            "process_resident_memory_bytes",
            "Resident memory size in bytes",
            process_resident_memory.clone(),
        );

        Self {
            registry,
            http_request_duration,
            votes_stored,
            save_failures,
            process_start_time,
            process_resident_memory,
        }
    }

    pub fn observe_request(&self, method: &str, route: &str, status_code: u16, seconds: f64) {
        self.http_request_duration
            .get_or_create(&HttpLabels {
                method: method.to_string(),
                route: route.to_string(),
                status_code: status_code.to_string(),
            })
            .observe(seconds);
    }

    pub fn set_votes_stored(&self, count: usize) {
        self.votes_stored.set(count as i64);
    }

    pub fn record_save_failure(&self) {
        self.save_failures.inc();
    }

    /// Refreshes the process gauges. Called right before a scrape is encoded.
    pub fn sample_process(&self) {
        if let Some(rss_bytes) = read_rss_bytes() {
            self.process_resident_memory.set(rss_bytes as i64);
        }
    }

    /// Encode all registered metrics to `OpenMetrics` text format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        prometheus_client::encoding::text::encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `VmRSS` from `/proc/self/status`. Returns RSS in bytes.
fn read_rss_bytes() -> Option<u64> {
    read_rss_bytes_from(&std::fs::read_to_string("/proc/self/status").ok()?)
}

fn read_rss_bytes_from(content: &str) -> Option<u64> {
    let line = content.lines().find_map(|line| line.strip_prefix("VmRSS:"))?;
    let trimmed = line.trim();
    let kb: u64 = trimmed.strip_suffix("kB").unwrap_or(trimmed).trim().parse().ok()?;
    Some(kb * 1024)
}

/// Times every request and files it under its matched route template.
pub struct HttpMetrics {
    metrics: Arc<Metrics>,
}

impl HttpMetrics {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

#[rocket::async_trait]
impl Fairing for HttpMetrics {
    fn info(&self) -> Info {
        Info {
            name: "HTTP metrics",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        RequestTimer::start(req);
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let route = req
            .route()
            .map(|route| route.uri.to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        self.metrics.observe_request(
            req.method().as_str(),
            &route,
            res.status().code,
            RequestTimer::elapsed(req).as_secs_f64(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_lists_families() {
        let encoded = Metrics::new().encode().unwrap();
        assert!(encoded.contains("# EOF"));
        assert!(encoded.contains("http_request_duration_seconds"));
        assert!(encoded.contains("votes_stored"));
    }

    #[test]
    fn observation_carries_labels() {
        let metrics = Metrics::new();
        metrics.observe_request("GET", "/votes/<id>", 200, 0.003);

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("method=\"GET\""));
        assert!(encoded.contains("route=\"/votes/<id>\""));
        assert!(encoded.contains("status_code=\"200\""));
        assert!(encoded.contains("le=\"0.005\""));
    }

    #[test]
    fn process_gauges_are_exposed() {
        let metrics = Metrics::new();
        metrics.sample_process();

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("process_start_time_seconds"));
        assert!(encoded.contains("process_resident_memory_bytes"));
        assert!(metrics.process_start_time.get() > 1_577_836_800.0);
        if cfg!(target_os = "linux") {
            assert!(metrics.process_resident_memory.get() > 0);
        }
    }

    #[test]
    fn parse_vmrss_from_status() {
        let content = "VmPeak:   123456 kB\nVmRSS:    51200 kB\nVmData:    80000 kB";
        assert_eq!(read_rss_bytes_from(content), Some(51200 * 1024));
        assert_eq!(read_rss_bytes_from("VmPeak:   123456 kB\n"), None);
    }

    #[test]
    fn gauge_and_counter_values() {
        let metrics = Metrics::new();
        metrics.set_votes_stored(7);
        metrics.record_save_failure();
        metrics.record_save_failure();

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("votes_stored 7"));
        assert!(encoded.contains("vote_store_save_failures_total 2"));
    }
}
