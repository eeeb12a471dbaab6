use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Label used for requests that matched no route.
pub const UNMATCHED_HANDLER: &str = "none";

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let handler = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_HANDLER.to_string());
    let request_size = content_length(req.headers());

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = status_group(response.status());

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "handler" => handler.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "handler" => handler.clone()
    )
    .record(duration.as_secs_f64());

    if let Some(size) = request_size {
        histogram!("http_request_size_bytes", "handler" => handler.clone()).record(size);
    }
    if let Some(size) = content_length(response.headers()) {
        histogram!("http_response_size_bytes", "handler" => handler).record(size);
    }

    response
}

/// Collapse a status code into its class, e.g. `404` -> `4xx`.
pub fn status_group(status: StatusCode) -> &'static str {
    match status.as_u16() / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        _ => "5xx",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(|v| v as f64)
}
