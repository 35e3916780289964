//! Primitive types for the swarm tracker.
//!
//! These are the values that travel between the HTTP boundary, the tracker
//! core and the swarm repository: the torrent identifier ([`InfoHash`](info_hash::InfoHash)),
//! the peer identifier and stored peer record ([`peer`]) and the announce
//! event sent by the client ([`announce_event::AnnounceEvent`]).
use std::time::Duration;

pub mod announce_event;
pub mod info_hash;
pub mod peer;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;
