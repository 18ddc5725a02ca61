//! Prometheus metrics for the wallboard API and its `/metrics` endpoint.
//!
//! Request traffic is labelled by resource (`agents`, `users`, `auth`).
//! Agent status changes and login results have their own counters.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use wallboard_app::domain::agents::records::AgentStatus;

use super::settings;

/// Request latency buckets, in seconds.
const LATENCY_BUCKETS: [f64; 12] = [
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// How a login attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginResult {
    Accepted,
    Refused,
    Failed,
}

impl LoginResult {
    const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Refused => "refused",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
struct WallboardMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    agent_status_changes_total: IntCounterVec,
    logins_total: IntCounterVec,
}

static METRICS: OnceLock<Option<WallboardMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(
    resource: &str,
    method: &str,
    route: &str,
    status: StatusCode,
    duration_seconds: f64,
) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .requests_total
        .with_label_values(&[resource, method, route, status_class(status)])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[resource, method])
        .observe(duration_seconds);
}

/// Count an agent moving into `status`.
pub(crate) fn record_status_change(status: AgentStatus) {
    if let Some(metrics) = metrics() {
        metrics
            .agent_status_changes_total
            .with_label_values(&[status.as_str()])
            .inc();
    }
}

pub(crate) fn record_login(result: LoginResult) {
    if let Some(metrics) = metrics() {
        metrics
            .logins_total
            .with_label_values(&[result.label()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::NOT_FOUND);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => error!("invalid metrics content type: {source}"),
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static WallboardMetrics> {
    if !settings::metrics_enabled() {
        return None;
    }

    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!(metric = name, "failed to create metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!(metric = name, "failed to register metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<WallboardMetrics> {
    let registry = match Registry::new_custom(Some("wallboard_json".to_string()), None) {
        Ok(registry) => registry,
        Err(source) => {
            error!("failed to create metrics registry: {source}");
            return None;
        }
    };

    let requests_total = register(
        &registry,
        "http_requests_total",
        IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests by resource, method, route and status class.",
            ),
            &["resource", "method", "route", "status_class"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "http_request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds by resource and method.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["resource", "method"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "http_requests_in_flight",
        IntGauge::new("http_requests_in_flight", "HTTP requests currently being served."),
    )?;

    let agent_status_changes_total = register(
        &registry,
        "agent_status_changes_total",
        IntCounterVec::new(
            Opts::new(
                "agent_status_changes_total",
                "Accepted agent status changes by new status.",
            ),
            &["status"],
        ),
    )?;

    let logins_total = register(
        &registry,
        "logins_total",
        IntCounterVec::new(
            Opts::new("logins_total", "Login attempts by result."),
            &["result"],
        ),
    )?;

    Some(WallboardMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        agent_status_changes_total,
        logins_total,
    })
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
