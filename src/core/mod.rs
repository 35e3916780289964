//! The core `tracker` module contains the `BitTorrent` tracker logic which is
//! independent of the delivery layer.
//!
//! It is a domain layer which does not specify how the end user connects to
//! the `Tracker`. The HTTP tracker in [`servers::http`](crate::servers::http)
//! is the only delivery layer today.
//!
//! ```text
//! Delivery layer     Domain layer
//!
//!     HTTP tracker |> Core tracker |> Swarm repository
//! ```
//!
//! # Tracker
//!
//! The [`Tracker`] has a few groups of responsibilities:
//!
//! - **Swarms**: it records the peers announced for every torrent and lists
//!   them back.
//! - **Authorization**: when an allow-list is configured, only the listed
//!   torrents are served.
//! - **Telemetry**: it hands every accepted announce to the telemetry
//!   listener, see [`telemetry`].
//!
//! ## Announce request
//!
//! A `BitTorrent` swarm is a network of peers that are all trying to download
//! the same torrent. A peer announces itself to the swarm via the tracker and
//! gets back other peers of the swarm:
//!
//! ```rust,no_run
//! use std::str::FromStr;
//!
//! use swarm_tracker_primitives::info_hash::InfoHash;
//! use swarm_tracker_primitives::peer;
//! use swarm_tracker_primitives::DurationSinceUnixEpoch;
//!
//! let info_hash = InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0").unwrap();
//!
//! let peer = peer::Peer {
//!     peer_id: peer::Id(*b"-qB00000000000000001"),
//!     ip: "126.0.0.1".to_string(),
//!     port: 8081,
//!     uploaded: 0,
//!     downloaded: 0,
//!     left: 0,
//!     last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//! };
//! ```
//!
//! ```text
//! let announce_data = tracker.announce(&info_hash, &peer, &AnnounceEvent::Started).await;
//! ```
//!
//! The announce runs entirely under the lock of the torrent swarm:
//!
//! 1. the peer record is stored (or deleted on a `stopped` event) with the
//!    current time as its last announce,
//! 2. the records older than the inactivity window are swept,
//! 3. up to `max_peers_per_response` records are listed, and the record of the
//!    announcing endpoint is left out.
//!
//! The result is an [`AnnounceData`] with the listed peers and the announce
//! policy the client has to follow.
//!
//! ## Swarm cleanup
//!
//! Swarms are swept on every announce. A swarm that stops receiving announces
//! is only swept by [`Tracker::cleanup_swarms`], which is run periodically by
//! the [`swarm_cleanup`](crate::bootstrap::jobs::swarm_cleanup) job when it is
//! enabled.
pub mod error;
pub mod services;
pub mod telemetry;

use std::collections::HashSet;
use std::panic::Location;
use std::sync::Arc;

use derive_more::Constructor;
use swarm_tracker_clock::clock::Time;
use swarm_tracker_configuration::{AnnouncePolicy, Configuration, TrackerPolicy};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer;
use swarm_tracker_swarm_repository::repository::RepositoryAsync;
use swarm_tracker_swarm_repository::Swarms;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info};

use self::error::Error;
use crate::CurrentClock;

/// The domain layer tracker service.
///
/// Its main responsibility is to handle `announce` requests. It is also the
/// container for the options the HTTP layer needs to shape its answers.
///
/// > **NOTICE**: the `Tracker` is not responsible for handling the network
/// > layer. It does not resolve the client IP, the caller does.
pub struct Tracker {
    announce_policy: AnnouncePolicy,
    policy: TrackerPolicy,
    allowed_info_hashes: HashSet<InfoHash>,
    pub swarms: Arc<Swarms>,
    telemetry_event_sender: Option<Box<dyn telemetry::EventSender>>,
    on_reverse_proxy: bool,
    legacy_failure_codes: bool,
}

/// Structure that holds the data returned by the `announce` request.
#[derive(Clone, Debug, PartialEq, Eq, Constructor)]
pub struct AnnounceData {
    /// The peers of the swarm, excluding the endpoint that announced.
    pub peers: Vec<peer::Peer>,
    pub policy: AnnouncePolicy,
}

impl Tracker {
    /// `Tracker` constructor.
    #[must_use]
    pub fn new(config: &Configuration, telemetry_event_sender: Option<Box<dyn telemetry::EventSender>>) -> Tracker {
        Tracker {
            announce_policy: config.core.announce_policy,
            policy: config.core.tracker_policy,
            allowed_info_hashes: config.core.allowed_info_hashes.iter().copied().collect(),
            swarms: Arc::default(),
            telemetry_event_sender,
            on_reverse_proxy: config.http_tracker.on_reverse_proxy,
            legacy_failure_codes: config.http_tracker.legacy_failure_codes,
        }
    }

    /// Returns `true` if the tracker only serves the torrents in its
    /// allow-list.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.allowed_info_hashes.is_empty()
    }

    /// Returns `true` if the client IP has to be taken from the
    /// `X-Forwarded-For` header.
    #[must_use]
    pub fn is_behind_reverse_proxy(&self) -> bool {
        self.on_reverse_proxy
    }

    /// Returns `true` if failures are answered with numeric codes.
    #[must_use]
    pub fn uses_legacy_failure_codes(&self) -> bool {
        self.legacy_failure_codes
    }

    #[must_use]
    pub fn get_announce_policy(&self) -> AnnouncePolicy {
        self.announce_policy
    }

    /// It handles an announce request.
    ///
    /// BEP 03: [The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html).
    pub async fn announce(&self, info_hash: &InfoHash, peer: &peer::Peer, event: &AnnounceEvent) -> AnnounceData {
        let peers = self
            .swarms
            .announce(info_hash, peer, event, CurrentClock::now(), &self.policy)
            .await;

        debug!(target: "TRACKER", "announce {info_hash} from {}:{} got {} peers", peer.ip, peer.port, peers.len());

        AnnounceData {
            peers,
            policy: self.get_announce_policy(),
        }
    }

    /// Lists the peers of a swarm as they are stored. An unknown torrent
    /// gives an empty list.
    pub async fn get_swarm_peers(&self, info_hash: &InfoHash) -> Vec<peer::Peer> {
        self.swarms.get_peers(info_hash, self.policy.max_peers_per_response).await
    }

    /// It checks the torrent is served by this tracker.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker has an allow-list and the infohash
    /// is not in it.
    #[track_caller]
    pub fn authorize(&self, info_hash: &InfoHash) -> Result<(), Error> {
        if !self.is_listed() || self.allowed_info_hashes.contains(info_hash) {
            return Ok(());
        }

        Err(Error::TorrentNotAllowed {
            info_hash: *info_hash,
            location: Location::caller(),
        })
    }

    /// Sweeps the inactive peers of every swarm, then drops the swarms left
    /// without peers.
    pub async fn cleanup_swarms(&self) {
        let removed_peers = self.swarms.remove_inactive_peers(CurrentClock::now(), &self.policy).await;
        let removed_swarms = self.swarms.remove_peerless_swarms().await;

        info!(target: "TRACKER", "removed {removed_peers} inactive peers and {removed_swarms} empty swarms");
    }

    /// Hands a telemetry event to the listener, if telemetry is enabled.
    pub fn send_telemetry_event(&self, event: telemetry::Event) -> Option<Result<(), TrySendError<telemetry::Event>>> {
        self.telemetry_event_sender
            .as_ref()
            .map(|telemetry_event_sender| telemetry_event_sender.send_event(event))
    }
}
