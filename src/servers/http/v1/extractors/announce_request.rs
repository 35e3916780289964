//! Axum [`extractor`](axum::extract) for the [`Announce`] request.
//!
//! It splits the query parameters and extracts an [`Announce`] request.
//!
//! Refer to [`Announce`](crate::servers::http::v1::requests::announce) for more
//! information about the returned structure and the order of the checks.
//!
//! It rejects the request with a bencoded
//! [`Error`](crate::servers::http::v1::responses::error) response (`200`)
//! when a mandatory param is missing or invalid.
//!
//! **Sample announce request**
//!
//! <http://0.0.0.0:7070/announce?info_hash=%81%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00&downloaded=0&uploaded=0&peer_id=-qB00000000000000001&port=17548&left=0&event=completed>
//!
//! **Sample error responses**
//!
//! Missing query params for `announce` request: <http://0.0.0.0:7070/announce>
//!
//! ```text
//! d14:failure reason17:missing info_hashe
//! ```
//!
//! The same request to a tracker configured with `legacy_failure_codes`:
//!
//! ```text
//! d12:failure codei101ee
//! ```
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::core::Tracker;
use crate::servers::http::v1::query::Query;
use crate::servers::http::v1::requests::announce::{Announce, AnnounceFailure};
use crate::servers::http::v1::responses;

/// Extractor for the [`Announce`] request.
///
/// The rejection depends on the tracker configuration, so it needs the
/// tracker as router state.
pub struct ExtractRequest(pub Announce);

impl FromRequestParts<Arc<Tracker>> for ExtractRequest {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, tracker: &Arc<Tracker>) -> Result<Self, Self::Rejection> {
        match extract_announce_from(parts.uri.query()) {
            Ok(announce_request) => Ok(ExtractRequest(announce_request)),
            Err(failure) => {
                debug!(target: "HTTP TRACKER", "announce rejected: {failure}");

                Err(responses::error::Error::from_announce_failure(&failure, tracker.uses_legacy_failure_codes()).into_response())
            }
        }
    }
}

fn extract_announce_from(maybe_raw_query: Option<&str>) -> Result<Announce, AnnounceFailure> {
    let query = Query::from(maybe_raw_query.unwrap_or_default());

    Announce::try_from(&query)
}
