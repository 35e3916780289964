use std::future::Future;

use swarm_tracker_configuration::TrackerPolicy;
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::{peer, DurationSinceUnixEpoch};

pub mod dash_map_mutex_tokio;

/// A collection of swarms addressed by info hash.
#[allow(clippy::module_name_repetitions)]
pub trait RepositoryAsync<T>: Default + 'static {
    /// Returns the swarm, if it exists.
    fn get(&self, key: &InfoHash) -> Option<T>;

    /// Runs an announce against the swarm of `info_hash`, creating the swarm
    /// if needed, and returns the peers to send back to the client.
    fn announce(
        &self,
        info_hash: &InfoHash,
        peer: &peer::Peer,
        event: &AnnounceEvent,
        now: DurationSinceUnixEpoch,
        policy: &TrackerPolicy,
    ) -> impl Future<Output = Vec<peer::Peer>> + Send;

    /// Lists up to `limit` records of a swarm without changing it. An unknown
    /// info hash gives an empty list and no swarm is created.
    fn get_peers(&self, info_hash: &InfoHash, limit: usize) -> impl Future<Output = Vec<peer::Peer>> + Send;

    /// Sweeps every swarm. Returns the number of records removed.
    fn remove_inactive_peers(&self, now: DurationSinceUnixEpoch, policy: &TrackerPolicy) -> impl Future<Output = usize> + Send;

    /// Drops swarms that hold no records. Returns the number dropped.
    fn remove_peerless_swarms(&self) -> impl Future<Output = usize> + Send;

    /// The number of swarms.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
