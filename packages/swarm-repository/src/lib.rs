//! The swarms of the tracker.
//!
//! A swarm is the set of peer records announced for one torrent. Every swarm
//! owns its own [`PeerStore`](peer_store::PeerStore) behind its own
//! `tokio` mutex, and the swarms live in a sharded [`DashMap`](dashmap::DashMap)
//! keyed by info hash:
//!
//! - two announces for the same torrent never interleave: the swarm lock is
//!   held for the whole upsert (or delete), sweep and listing;
//! - announces for different torrents never wait for each other.
//!
//! Swarms are created by the first announce for their info hash. Reading a
//! swarm never creates it.
use std::sync::Arc;

use peer_store::in_memory::InMemoryPeerStore;
use repository::dash_map_mutex_tokio::DashMapMutexTokio;

pub mod peer_store;
pub mod repository;
pub mod swarm;

// Swarm entry

pub type SwarmSingle<S> = swarm::Swarm<S>;
pub type SwarmMutexTokio<S> = Arc<tokio::sync::Mutex<SwarmSingle<S>>>;

// Repos

/// The registry used by the tracker: swarms kept in memory.
pub type Swarms = DashMapMutexTokio<InMemoryPeerStore>;
