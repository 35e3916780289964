use std::future::Future;
use std::time::Duration;

use swarm_tracker_configuration::TrackerPolicy;
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::{peer, DurationSinceUnixEpoch};

use crate::peer_store::PeerStore;

pub mod mutex_tokio;

/// Operations on a swarm shared between tasks.
#[allow(clippy::module_name_repetitions)]
pub trait SwarmAsync {
    /// See [`Swarm::announce`]. Returns `None` if the swarm was retired
    /// while waiting for it.
    fn announce(
        &self,
        peer: &peer::Peer,
        event: &AnnounceEvent,
        now: DurationSinceUnixEpoch,
        policy: &TrackerPolicy,
    ) -> impl Future<Output = Option<Vec<peer::Peer>>> + Send;

    fn sweep(&self, now: DurationSinceUnixEpoch, policy: &TrackerPolicy) -> impl Future<Output = usize> + Send;

    fn list(&self, limit: usize) -> impl Future<Output = Vec<peer::Peer>> + Send;
}

/// The peer records of one torrent.
///
/// Records are keyed by peer id only: a peer announcing again, even from a
/// new address, replaces its record.
#[derive(Debug, Default)]
pub struct Swarm<S> {
    store: S,
    /// Set when the repository dropped this swarm. A retired swarm takes no
    /// more announces.
    retired: bool,
}

impl<S: PeerStore> Swarm<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store, retired: false }
    }

    /// Processes one announce:
    ///
    /// 1. `stopped` deletes the record of the peer, any other event upserts it
    ///    with `now` as its last announce time,
    /// 2. the swarm is swept (see [`Swarm::sweep`]),
    /// 3. up to `max_peers_per_response` records are listed, minus the one
    ///    matching the announcing (`peer_id`, `ip`, `port`).
    pub async fn announce(
        &mut self,
        peer: &peer::Peer,
        event: &AnnounceEvent,
        now: DurationSinceUnixEpoch,
        policy: &TrackerPolicy,
    ) -> Vec<peer::Peer> {
        if event.is_stopped() {
            self.store.delete(&peer.peer_id).await;
        } else {
            let record = peer::Peer {
                last_announce: now,
                ..peer.clone()
            };
            self.store.put(record.peer_id, record).await;
        }

        self.sweep(now, policy).await;

        self.list(policy.max_peers_per_response)
            .await
            .into_iter()
            .filter(|record| !record.is_same_endpoint(peer))
            .collect()
    }

    /// Deletes every record whose last announce is more than
    /// `max_peer_timeout` seconds before `now`. Returns how many were deleted.
    pub async fn sweep(&mut self, now: DurationSinceUnixEpoch, policy: &TrackerPolicy) -> usize {
        let cutoff = now.saturating_sub(Duration::from_secs(u64::from(policy.max_peer_timeout)));

        let inactive: Vec<peer::Id> = self
            .store
            .list(None)
            .await
            .into_iter()
            .filter(|(_, record)| record.last_announce < cutoff)
            .map(|(key, _)| key)
            .collect();

        for key in &inactive {
            self.store.delete(key).await;
        }

        inactive.len()
    }

    /// Up to `limit` records, in store order.
    pub async fn list(&self, limit: usize) -> Vec<peer::Peer> {
        self.store.list(Some(limit)).await.into_iter().map(|(_, record)| record).collect()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.list(Some(1)).await.is_empty()
    }

    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub(crate) fn retire(&mut self) {
        self.retired = true;
    }
}
