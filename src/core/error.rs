//! Errors returned by the core `Tracker`.
//!
//! Error | Context | Description
//! ---|---|---
//! `TorrentNotAllowed` | Authorization | The tracker has an allow-list and the torrent is not in it.
use std::panic::Location;

use swarm_tracker_primitives::info_hash::InfoHash;

/// Authorization error returned by the core `Tracker`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("The torrent: {info_hash}, is not in the allow-list, {location}")]
    TorrentNotAllowed {
        info_hash: InfoHash,
        location: &'static Location<'static>,
    },
}
