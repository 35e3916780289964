//! Axum [`handler`](axum#handlers) for the swarm listing.
//!
//! `GET /<info_hash>` answers with the records of a swarm as a JSON array. It
//! is an inspection path: the swarm is not swept and an unknown torrent gives
//! an empty array.
//!
//! ```json
//! [{"peerId":"-qB00000000000000001","ip":"126.0.0.1","port":8080,"uploaded":0,"downloaded":0,"left":0,"lastAnnounce":1669397478934}]
//! ```
//!
//! The info hash must be exactly 40 hex characters (either case). Anything
//! else, or a torrent outside the allow-list, is a `404 not found`.
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use swarm_tracker_primitives::info_hash::InfoHash;

use crate::core::Tracker;
use crate::servers::http::v1::responses::error::NotFound;

pub async fn handle(State(tracker): State<Arc<Tracker>>, Path(raw_info_hash): Path<String>) -> Response {
    let Ok(info_hash) = InfoHash::from_str(&raw_info_hash) else {
        return NotFound.into_response();
    };

    if tracker.authorize(&info_hash).is_err() {
        return NotFound.into_response();
    }

    Json(tracker.get_swarm_peers(&info_hash).await).into_response()
}
