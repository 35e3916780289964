//! **Swarm Tracker** is a small HTTP `BitTorrent` tracker.
//!
//! Peers announce themselves for a torrent (a "swarm") with a `GET` request
//! and the tracker answers with a [bencoded](https://en.wikipedia.org/wiki/Bencode)
//! list of the other peers of the same swarm.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Configuration](#configuration)
//! - [Components](#components)
//!
//! # Features
//!
//! - One independently locked swarm per info hash.
//! - Binary-safe decoding of the percent-encoded `info_hash`.
//! - Inactive peers are swept on every announce, and optionally by a periodic job.
//! - Optional allow-list of torrents.
//! - Optional secret path prefix (`/<path_key>/announce`).
//! - Optional telemetry: every announce can be shipped as a JSON log entry.
//! - A JSON listing of the peers of a swarm at `/<info_hash>`.
//!
//! # Configuration
//!
//! The configuration is loaded from `./share/default/config/tracker.toml`, the
//! `SWARM_TRACKER_CONFIG_TOML` environment variable, and per-option
//! environment variables. Refer to the
//! [configuration crate](https://docs.rs/swarm-tracker-configuration).
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! inactive_peer_cleanup_interval = 0
//! allowed_info_hashes = []
//!
//! [core.announce_policy]
//! interval = 1800
//!
//! [http_tracker]
//! bind_address = "0.0.0.0:7070"
//! on_reverse_proxy = false
//! ```
//!
//! # Components
//!
//! - [`core`]: the domain tracker. It owns the swarms and the allow-list.
//! - [`servers::http`]: the axum HTTP server.
//! - [`bootstrap`]: setup of the configuration, logging and jobs.
//! - [`shared`]: the parser combinators used by the percent decoder.
use swarm_tracker_clock::clock;

pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;
pub mod shared;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
