//! The `announce` service.
//!
//! The service is responsible for handling the `announce` requests once they
//! have been extracted, authorized and the peer address resolved.
//!
//! It builds the stored [`peer::Peer`] record, hands a [`telemetry::Event`] to
//! the tracker and delegates the `announce` logic to the
//! [`Tracker`](crate::core::Tracker::announce).
use std::sync::Arc;

use swarm_tracker_clock::clock::Time;
use swarm_tracker_primitives::peer;
use tracing::warn;

use crate::core::{telemetry, AnnounceData, Tracker};
use crate::servers::http::v1::requests::announce::Announce;
use crate::CurrentClock;

/// The HTTP tracker `announce` service.
///
/// The telemetry event is queued without waiting, before the swarm is
/// touched. A full queue drops the event.
pub async fn invoke(tracker: Arc<Tracker>, announce_request: &Announce, peer_ip: String) -> AnnounceData {
    let peer = peer_from_request(announce_request, peer_ip);

    let event = telemetry::Event::announce(&announce_request.info_hash, &peer, &announce_request.event);

    if let Some(Err(err)) = tracker.send_telemetry_event(event) {
        warn!(target: "TELEMETRY", "announce event dropped: {err}");
    }

    tracker
        .announce(&announce_request.info_hash, &peer, &announce_request.event)
        .await
}

/// It builds the record stored for the announcing peer.
#[must_use]
fn peer_from_request(announce_request: &Announce, peer_ip: String) -> peer::Peer {
    peer::Peer {
        peer_id: announce_request.peer_id,
        ip: peer_ip,
        port: announce_request.port,
        uploaded: announce_request.uploaded,
        downloaded: announce_request.downloaded,
        left: announce_request.left,
        last_announce: CurrentClock::now(),
    }
}
