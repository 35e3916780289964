//! `Announce` request for the HTTP tracker.
//!
//! Data structures and logic for extracting the `announce` request from the
//! split query params.
//!
//! The params are checked in a fixed order and the first failing check is the
//! one reported to the client:
//!
//! Order | Param | Failure | Code
//! ---|---|---|---
//! 1 | `info_hash` absent | `missing info_hash` | 101
//! 2 | `info_hash` not 20 bytes once percent decoded | `invalid info_hash length` | 150
//! 3 | `peer_id` absent | `missing peer_id` | 102
//! 4 | `peer_id` not 20 bytes (raw, not decoded) | `invalid peer_id length` | 151
//! 5 | `port` absent, not a number, `0` or above `65535` | `missing port` | 103
//!
//! `uploaded`, `downloaded` and `left` default to `0` when they are absent or
//! not a number. `event` and `ip` are passed through without validation.
use std::str::FromStr;

use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer::{self, IdConversionError};
use thiserror::Error;

use crate::servers::http::percent_encoding::{percent_decode_info_hash, InfoHashDecodeError};
use crate::servers::http::v1::query::Query;

/// The number of bytes `downloaded`, `uploaded` or `left`.
pub type NumberOfBytes = u64;

// Query param names
const INFO_HASH: &str = "info_hash";
const PEER_ID: &str = "peer_id";
const PORT: &str = "port";
const DOWNLOADED: &str = "downloaded";
const UPLOADED: &str = "uploaded";
const LEFT: &str = "left";
const EVENT: &str = "event";
const IP: &str = "ip";

/// The `Announce` request. Fields use the domain types after extracting the
/// query params of the request.
///
/// ```rust
/// use swarm_tracker::servers::http::v1::requests::announce::Announce;
/// use swarm_tracker_primitives::announce_event::AnnounceEvent;
/// use swarm_tracker_primitives::info_hash::InfoHash;
/// use swarm_tracker_primitives::peer;
///
/// let request = Announce {
///     // Mandatory params
///     info_hash: "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse::<InfoHash>().unwrap(),
///     peer_id: peer::Id(*b"-qB00000000000000001"),
///     port: 17548,
///     // Optional params
///     downloaded: 1,
///     uploaded: 2,
///     left: 3,
///     event: AnnounceEvent::Started,
///     ip: None,
/// };
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct Announce {
    // Mandatory params
    /// The `InfoHash` of the torrent.
    pub info_hash: InfoHash,
    /// The `peer::Id` of the peer.
    pub peer_id: peer::Id,
    /// The port of the peer.
    pub port: u16,

    // Optional params
    /// The number of bytes downloaded by the peer.
    pub downloaded: NumberOfBytes,

    /// The number of bytes uploaded by the peer.
    pub uploaded: NumberOfBytes,

    /// The number of bytes left to download by the peer.
    pub left: NumberOfBytes,

    /// The event that the peer is reporting. [`AnnounceEvent::None`] when the
    /// param is absent.
    pub event: AnnounceEvent,

    /// The address the peer wants to be reached at. The tracker uses the
    /// client address when it is absent.
    pub ip: Option<String>,
}

/// The reasons an `announce` request can be rejected by the extraction.
///
/// They are values, never panics. The `Display` output is the
/// `failure reason` sent to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnounceFailure {
    #[error("missing info_hash")]
    MissingInfoHash,
    #[error("invalid info_hash length")]
    InvalidInfoHashLength { source: InfoHashDecodeError },
    #[error("missing peer_id")]
    MissingPeerId,
    #[error("invalid peer_id length")]
    InvalidPeerIdLength { source: IdConversionError },
    #[error("missing port")]
    MissingPort,
}

impl AnnounceFailure {
    /// The numeric failure code for trackers that answer with a
    /// `failure code` instead of a `failure reason`.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            AnnounceFailure::MissingInfoHash => 101,
            AnnounceFailure::InvalidInfoHashLength { .. } => 150,
            AnnounceFailure::MissingPeerId => 102,
            AnnounceFailure::InvalidPeerIdLength { .. } => 151,
            AnnounceFailure::MissingPort => 103,
        }
    }
}

impl TryFrom<&Query> for Announce {
    type Error = AnnounceFailure;

    fn try_from(query: &Query) -> Result<Self, Self::Error> {
        Ok(Self {
            info_hash: extract_info_hash(query)?,
            peer_id: extract_peer_id(query)?,
            port: extract_port(query)?,
            downloaded: extract_number_of_bytes_from_param(DOWNLOADED, query),
            uploaded: extract_number_of_bytes_from_param(UPLOADED, query),
            left: extract_number_of_bytes_from_param(LEFT, query),
            event: extract_event(query),
            ip: query.get_param(IP).map(ToOwned::to_owned),
        })
    }
}

// Mandatory params

fn extract_info_hash(query: &Query) -> Result<InfoHash, AnnounceFailure> {
    let raw_param = query.get_param(INFO_HASH).ok_or(AnnounceFailure::MissingInfoHash)?;

    percent_decode_info_hash(raw_param).map_err(|source| AnnounceFailure::InvalidInfoHashLength { source })
}

fn extract_peer_id(query: &Query) -> Result<peer::Id, AnnounceFailure> {
    let raw_param = query.get_param(PEER_ID).ok_or(AnnounceFailure::MissingPeerId)?;

    peer::Id::try_from(raw_param.as_bytes()).map_err(|source| AnnounceFailure::InvalidPeerIdLength { source })
}

fn extract_port(query: &Query) -> Result<u16, AnnounceFailure> {
    query
        .get_param(PORT)
        .and_then(parse_leading_integer)
        .and_then(|port| u16::try_from(port).ok())
        .filter(|port| *port != 0)
        .ok_or(AnnounceFailure::MissingPort)
}

// Optional params

fn extract_number_of_bytes_from_param(param_name: &str, query: &Query) -> NumberOfBytes {
    query.get_param(param_name).and_then(parse_leading_integer).unwrap_or_default()
}

fn extract_event(query: &Query) -> AnnounceEvent {
    query
        .get_param(EVENT)
        .map(|raw_param| AnnounceEvent::from_str(raw_param).unwrap_or_default())
        .unwrap_or_default()
}

/// Parses the leading decimal digits of a param, like clients expect from
/// most trackers: `"17548abc"` is `17548`.
///
/// Leading whitespace and a sign are accepted. It returns `None` when there
/// are no digits, when the number is negative or when it does not fit in a
/// `u64`.
fn parse_leading_integer(raw_param: &str) -> Option<u64> {
    let trimmed = raw_param.trim_start();

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();

    if digits_len == 0 {
        return None;
    }

    let number = u64::from_str(&unsigned[..digits_len]).ok()?;

    if negative && number != 0 {
        return None;
    }

    Some(number)
}
