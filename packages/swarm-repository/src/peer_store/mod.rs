//! Storage of the peer records of one swarm.
use std::future::Future;

use swarm_tracker_primitives::peer;

pub mod in_memory;

/// A key value store holding the records of a single swarm, keyed by peer id.
///
/// A store is only ever used by the swarm that owns it, and the swarm
/// serializes every call, so implementations need no locking of their own.
/// Calls may suspend (a remote store), but they do not fail: a store that
/// can not answer stalls its own swarm only.
pub trait PeerStore: Default + Send + Sync + 'static {
    /// Inserts the record, replacing any record with the same key.
    fn put(&mut self, key: peer::Id, record: peer::Peer) -> impl Future<Output = ()> + Send;

    /// Removes the record. Removing a missing key is not an error.
    fn delete(&mut self, key: &peer::Id) -> impl Future<Output = ()> + Send;

    /// Returns up to `limit` records (all of them for `None`), in the
    /// enumeration order of the store.
    fn list(&self, limit: Option<usize>) -> impl Future<Output = Vec<(peer::Id, peer::Peer)>> + Send;
}
