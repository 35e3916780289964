use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use swarm_tracker_configuration::TrackerPolicy;
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::{peer, DurationSinceUnixEpoch};

use super::RepositoryAsync;
use crate::peer_store::PeerStore;
use crate::swarm::SwarmAsync;
use crate::SwarmMutexTokio;

/// Swarms in a sharded concurrent map, each behind its own `tokio` mutex.
///
/// Map guards are never held across an `.await`: the swarm handle is cloned
/// out of the map first, then locked.
#[derive(Debug)]
pub struct DashMapMutexTokio<S> {
    pub swarms: DashMap<InfoHash, SwarmMutexTokio<S>>,
}

impl<S> Default for DashMapMutexTokio<S> {
    fn default() -> Self {
        Self { swarms: DashMap::new() }
    }
}

impl<S: PeerStore> DashMapMutexTokio<S> {
    fn get_or_create(&self, info_hash: &InfoHash) -> SwarmMutexTokio<S> {
        self.swarms.entry(*info_hash).or_default().value().clone()
    }

    fn snapshot(&self) -> Vec<(InfoHash, SwarmMutexTokio<S>)> {
        self.swarms
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }
}

impl<S: PeerStore> RepositoryAsync<SwarmMutexTokio<S>> for DashMapMutexTokio<S> {
    fn get(&self, key: &InfoHash) -> Option<SwarmMutexTokio<S>> {
        self.swarms.get(key).map(|entry| entry.value().clone())
    }

    async fn announce(
        &self,
        info_hash: &InfoHash,
        peer: &peer::Peer,
        event: &AnnounceEvent,
        now: DurationSinceUnixEpoch,
        policy: &TrackerPolicy,
    ) -> Vec<peer::Peer> {
        loop {
            let swarm = self.get_or_create(info_hash);

            // A swarm retired while we waited for its lock is no longer in the
            // map: take the one that replaced it.
            if let Some(peers) = swarm.announce(peer, event, now, policy).await {
                return peers;
            }
        }
    }

    async fn get_peers(&self, info_hash: &InfoHash, limit: usize) -> Vec<peer::Peer> {
        match self.get(info_hash) {
            Some(swarm) => swarm.list(limit).await,
            None => vec![],
        }
    }

    async fn remove_inactive_peers(&self, now: DurationSinceUnixEpoch, policy: &TrackerPolicy) -> usize {
        let swarms = self.snapshot();

        join_all(swarms.iter().map(|(_, swarm)| swarm.sweep(now, policy)))
            .await
            .into_iter()
            .sum()
    }

    async fn remove_peerless_swarms(&self) -> usize {
        let mut removed = 0;

        for (info_hash, swarm) in self.snapshot() {
            let mut guard = swarm.lock().await;

            // Removed while still locked, so no announce can reach a retired
            // swarm through the map.
            if guard.is_empty().await {
                guard.retire();
                self.swarms.remove_if(&info_hash, |_, current| Arc::ptr_eq(current, &swarm));
                removed += 1;
            }
        }

        removed
    }

    fn len(&self) -> usize {
        self.swarms.len()
    }
}
