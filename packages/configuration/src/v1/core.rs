use serde::{Deserialize, Serialize};
use swarm_tracker_primitives::info_hash::InfoHash;

use super::lenient::info_hash_list;
use crate::{AnnouncePolicy, TrackerPolicy};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    // Announce policy configuration.
    #[serde(default = "Core::default_announce_policy")]
    pub announce_policy: AnnouncePolicy,

    /// Interval in seconds of the background job that sweeps inactive peers
    /// from every swarm. `0` disables the job: swarms are still swept on
    /// every announce they receive.
    #[serde(default = "Core::default_inactive_peer_cleanup_interval")]
    pub inactive_peer_cleanup_interval: u64,

    /// Torrents the tracker serves. An empty list serves every torrent.
    #[serde(default, deserialize_with = "info_hash_list")]
    pub allowed_info_hashes: Vec<InfoHash>,

    // Tracker policy configuration.
    #[serde(default = "Core::default_tracker_policy")]
    pub tracker_policy: TrackerPolicy,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            announce_policy: Self::default_announce_policy(),
            inactive_peer_cleanup_interval: Self::default_inactive_peer_cleanup_interval(),
            allowed_info_hashes: Vec::new(),
            tracker_policy: Self::default_tracker_policy(),
        }
    }
}

impl Core {
    fn default_announce_policy() -> AnnouncePolicy {
        AnnouncePolicy::default()
    }

    fn default_inactive_peer_cleanup_interval() -> u64 {
        0
    }

    fn default_tracker_policy() -> TrackerPolicy {
        TrackerPolicy::default()
    }
}
