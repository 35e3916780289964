use swarm_tracker_configuration::TrackerPolicy;
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::{peer, DurationSinceUnixEpoch};

use super::SwarmAsync;
use crate::peer_store::PeerStore;
use crate::SwarmMutexTokio;

impl<S: PeerStore> SwarmAsync for SwarmMutexTokio<S> {
    async fn announce(
        &self,
        peer: &peer::Peer,
        event: &AnnounceEvent,
        now: DurationSinceUnixEpoch,
        policy: &TrackerPolicy,
    ) -> Option<Vec<peer::Peer>> {
        let mut swarm = self.lock().await;

        if swarm.is_retired() {
            return None;
        }

        Some(swarm.announce(peer, event, now, policy).await)
    }

    async fn sweep(&self, now: DurationSinceUnixEpoch, policy: &TrackerPolicy) -> usize {
        self.lock().await.sweep(now, policy).await
    }

    async fn list(&self, limit: usize) -> Vec<peer::Peer> {
        self.lock().await.list(limit).await
    }
}
