//! Per-request logging, request ids, and trace parent extraction.

mod ids;
mod parent_context;
mod routes;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Identifying details of a request, captured before the handler runs.
#[derive(Debug)]
struct RequestLog {
    request_id: String,
    method: String,
    path: String,
    route: String,
}

impl RequestLog {
    fn span(&self, remote_addr: &str) -> Span {
        tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %format!("{} {}", self.method, self.route),
            otel.kind = "server",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        )
    }

    fn finish(&self, span: &Span, status: StatusCode, elapsed: Duration) {
        let duration_ms = elapsed.as_millis();
        let threshold_ms = u128::from(settings::slow_request_threshold_ms());

        metrics::observe_request(
            &self.method,
            &self.route,
            status.as_u16(),
            elapsed.as_secs_f64(),
        );

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    "client error response"
                );
            }

            if duration_ms > threshold_ms {
                warn!(
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let path = req.uri().path().to_owned();

    let log = RequestLog {
        request_id: ids::resolve(req.header::<String>(ids::REQUEST_ID_HEADER)),
        method: req.method().to_string(),
        route: routes::route_label(&path),
        path,
    };

    depot.insert(REQUEST_ID_DEPOT_KEY, log.request_id.clone());
    ids::set_header(res, &log.request_id);

    let _in_flight = metrics::InFlightRequestGuard::track();
    let span = log.span(&req.remote_addr().to_string());

    if settings::trace_parent_propagation()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let status = res.status_code.unwrap_or(StatusCode::OK);

    log.finish(&span, status, started.elapsed());
}
