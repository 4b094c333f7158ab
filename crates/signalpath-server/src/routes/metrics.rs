//! Health and Prometheus metrics: `/healthz`, `/metrics`
//!
//! No authentication required. Designed for load balancers and scraping.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Build the health and metrics router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(prometheus_metrics))
}

/// `GET /healthz`. The site has no local dependencies, so being able to
/// answer is healthy.
async fn healthz() -> &'static str {
    "ok"
}

/// `GET /metrics`: Prometheus text format metrics.
///
/// Exposes:
/// - `signalpath_pilot_applications_total{outcome}` (counter)
/// - `signalpath_consent_writes_total{outcome}` (counter): consent writes are
///   attempted once; `failed` counts events that were dropped
/// - `signalpath_info` (gauge): build info label
async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut lines = Vec::with_capacity(24);

    let pilot = &state.pilot_outcomes;
    lines.push("# HELP signalpath_pilot_applications_total Pilot application submissions by outcome.".to_owned());
    lines.push("# TYPE signalpath_pilot_applications_total counter".to_owned());
    for (outcome, counter) in [
        ("received", &pilot.received),
        ("rejected", &pilot.rejected),
        ("duplicate", &pilot.duplicate),
        ("failed", &pilot.failed),
    ] {
        lines.push(format!(
            "signalpath_pilot_applications_total{{outcome=\"{outcome}\"}} {}",
            counter.load(Ordering::Relaxed)
        ));
    }

    let consent = state.consent.stats();
    lines.push("# HELP signalpath_consent_writes_total Consent ledger writes by outcome.".to_owned());
    lines.push("# TYPE signalpath_consent_writes_total counter".to_owned());
    for (outcome, value) in [
        ("attempted", consent.attempted),
        ("recorded", consent.recorded),
        ("failed", consent.failed),
    ] {
        lines.push(format!(
            "signalpath_consent_writes_total{{outcome=\"{outcome}\"}} {value}"
        ));
    }

    lines.push("# HELP signalpath_info SignalPath build information.".to_owned());
    lines.push("# TYPE signalpath_info gauge".to_owned());
    lines.push(format!(
        "signalpath_info{{version=\"{}\"}} 1",
        env!("CARGO_PKG_VERSION")
    ));

    let mut body = lines.join("\n");
    body.push('\n');

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
