use std::collections::BTreeMap;

use swarm_tracker_primitives::peer;

use super::PeerStore;

/// Peer records kept in an ordered map. Listing follows the peer id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryPeerStore {
    peers: BTreeMap<peer::Id, peer::Peer>,
}

impl InMemoryPeerStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl PeerStore for InMemoryPeerStore {
    async fn put(&mut self, key: peer::Id, record: peer::Peer) {
        self.peers.insert(key, record);
    }

    async fn delete(&mut self, key: &peer::Id) {
        self.peers.remove(key);
    }

    async fn list(&self, limit: Option<usize>) -> Vec<(peer::Id, peer::Peer)> {
        let records = self.peers.iter().map(|(key, record)| (*key, record.clone()));

        match limit {
            Some(limit) => records.take(limit).collect(),
            None => records.collect(),
        }
    }
}
