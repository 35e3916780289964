//! HTTP server routes for version `v1`.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::handlers::{announce, swarm};
use super::responses::error::NotFound;
use crate::core::Tracker;

/// It adds the routes to the router.
///
/// With a `path_key` the tracker routes are only reachable under
/// `/<path_key>/`. Any other request is answered with `404 not found`.
///
/// > **NOTICE**: the client IP is taken from the connection info, so the
/// > router has to be served with
/// > [`into_make_service_with_connect_info`](axum::Router::into_make_service_with_connect_info).
#[allow(clippy::needless_pass_by_value)]
pub fn router(tracker: Arc<Tracker>, path_key: Option<&str>, &addr: &SocketAddr) -> Router {
    let tracker_routes = Router::new()
        .route("/announce", get(announce::handle))
        .route("/{info_hash}", get(swarm::handle))
        .with_state(tracker);

    let router = match path_key {
        Some(key) => Router::new().nest(&format!("/{key}"), tracker_routes),
        None => tracker_routes,
    };

    router
        .fallback(not_found)
        .layer(PropagateHeaderLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(move |request: &Request<axum::body::Body>, _span: &Span| {
                    let method = request.method().to_string();
                    let uri = request.uri().to_string();
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();

                    tracing::debug!(
                        target: "HTTP TRACKER",
                        server_socket_addr = %addr, method = %method, uri = %uri, request_id = %request_id, "request");
                })
                .on_response(move |response: &Response, latency: Duration, _span: &Span| {
                    let status_code = response.status();
                    let request_id = response
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let latency_ms = latency.as_millis();

                    tracing::debug!(
                        target: "HTTP TRACKER",
                        server_socket_addr = %addr, latency = %latency_ms, status = %status_code, request_id = %request_id, "response");
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn not_found() -> impl IntoResponse {
    NotFound
}
