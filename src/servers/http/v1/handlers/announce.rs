//! Axum [`handlers`](axum#handlers) for the `announce` requests.
//!
//! Refer to [HTTP server](crate::servers::http) for more information about the
//! `announce` request.
//!
//! The handler performs the authorization of the request and resolves the
//! peer address. The request itself has already been extracted and validated
//! by the [`ExtractRequest`] extractor.
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::core::{AnnounceData, Tracker};
use crate::servers::http::v1::extractors::announce_request::ExtractRequest;
use crate::servers::http::v1::extractors::client_ip_sources::Extract as ExtractClientIpSources;
use crate::servers::http::v1::requests::announce::Announce;
use crate::servers::http::v1::responses::error::{NotFound, NOT_ALLOWED_FAILURE_CODE};
use crate::servers::http::v1::responses::{self};
use crate::servers::http::v1::services::peer_ip_resolver::ClientIpSources;
use crate::servers::http::v1::services::{self, peer_ip_resolver};

/// It handles the `announce` request.
pub async fn handle(
    State(tracker): State<Arc<Tracker>>,
    ExtractRequest(announce_request): ExtractRequest,
    ExtractClientIpSources(client_ip_sources): ExtractClientIpSources,
) -> Response {
    debug!(target: "HTTP TRACKER", "http announce request: {announce_request:?}");

    match handle_announce(&tracker, &announce_request, &client_ip_sources).await {
        Ok(announce_data) => responses::Announce::from(announce_data).into_response(),
        Err(error) => error,
    }
}

async fn handle_announce(
    tracker: &Arc<Tracker>,
    announce_request: &Announce,
    client_ip_sources: &ClientIpSources,
) -> Result<AnnounceData, Response> {
    // Authorization
    if let Err(error) = tracker.authorize(&announce_request.info_hash) {
        debug!(target: "HTTP TRACKER", "{error}");

        return Err(if tracker.uses_legacy_failure_codes() {
            responses::error::Error::Code(NOT_ALLOWED_FAILURE_CODE).into_response()
        } else {
            NotFound.into_response()
        });
    }

    let peer_ip = peer_ip_resolver::resolve(
        tracker.is_behind_reverse_proxy(),
        announce_request.ip.as_deref(),
        client_ip_sources,
    )
    .map_err(|error| responses::error::Error::Reason(error.to_string()).into_response())?;

    Ok(services::announce::invoke(tracker.clone(), announce_request, peer_ip).await)
}
