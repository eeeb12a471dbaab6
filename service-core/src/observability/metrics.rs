//! Metrics collection and Prometheus export.
//!
//! A single recorder serves the whole process; every service in it shares the
//! same exposition.

use metrics::{Unit, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

struct Recorder {
    handle: PrometheusHandle,
    started: Instant,
}

static RECORDER: OnceLock<Recorder> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Safe to call more than once; only the first call installs the recorder.
/// Panics if some other global recorder is already installed.
pub fn init_metrics() {
    RECORDER.get_or_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder");

        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_request_duration_seconds",
            Unit::Seconds,
            "HTTP request duration in seconds"
        );
        describe_histogram!(
            "http_request_size_bytes",
            Unit::Bytes,
            "Content length of incoming requests"
        );
        describe_histogram!(
            "http_response_size_bytes",
            Unit::Bytes,
            "Content length of outgoing responses"
        );
        describe_gauge!(
            "process_start_time_seconds",
            Unit::Seconds,
            "Start time of the process since unix epoch in seconds"
        );
        describe_gauge!(
            "process_uptime_seconds",
            Unit::Seconds,
            "Seconds since the metrics recorder was installed"
        );

        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        gauge!("process_start_time_seconds").set(start_time);

        Recorder {
            handle,
            started: Instant::now(),
        }
    });
}

/// Get the current metrics in Prometheus text format.
///
/// Returns a string suitable for the /metrics HTTP endpoint.
pub fn render_metrics() -> String {
    match RECORDER.get() {
        Some(recorder) => {
            gauge!("process_uptime_seconds").set(recorder.started.elapsed().as_secs_f64());
            recorder.handle.render()
        }
        None => "# Metrics recorder not initialized\n".to_string(),
    }
}
