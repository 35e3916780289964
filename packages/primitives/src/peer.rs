//! Peer record stored by the swarm repository.
//!
//! A sample peer:
//!
//! ```rust,no_run
//! use swarm_tracker_primitives::peer;
//! use swarm_tracker_primitives::DurationSinceUnixEpoch;
//!
//! peer::Peer {
//!     peer_id: peer::Id(*b"-qB00000000000000000"),
//!     ip: "126.0.0.1".to_string(),
//!     port: 8080,
//!     uploaded: 0,
//!     downloaded: 0,
//!     left: 0,
//!     last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//! };
//! ```
use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

use crate::DurationSinceUnixEpoch;

/// The record kept for every peer of a swarm.
///
/// A swarm holds at most one record per [`Id`]. A later announce with the
/// same id replaces the record, even if the address changed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    /// ID used by the downloader peer
    pub peer_id: Id,
    /// The address the peer announced, or the one the tracker observed
    pub ip: String,
    /// The port this peer is listening on
    pub port: u16,
    /// The total amount of bytes uploaded by this peer so far
    pub uploaded: u64,
    /// The total amount of bytes downloaded by this peer so far
    pub downloaded: u64,
    /// The number of bytes this peer still has to download
    pub left: u64,
    /// The last time the tracker received an announce request from this peer
    #[serde(serialize_with = "ser_unix_time_value")]
    pub last_announce: DurationSinceUnixEpoch,
}

impl Peer {
    /// Whether this record belongs to the peer announcing from the given
    /// (`peer_id`, `ip`, `port`) triple.
    #[must_use]
    pub fn is_same_endpoint(&self, other: &Peer) -> bool {
        self.peer_id == other.peer_id && self.ip == other.ip && self.port == other.port
    }

    #[must_use]
    pub fn is_seeder(&self) -> bool {
        self.left == 0
    }
}

/// Serializes a `DurationSinceUnixEpoch` as a Unix timestamp in milliseconds.
/// # Errors
///
/// Will return `serde::Serializer::Error` if unable to serialize the `unix_time_value`.
pub fn ser_unix_time_value<S: serde::Serializer>(unix_time_value: &DurationSinceUnixEpoch, ser: S) -> Result<S::Ok, S::Error> {
    #[allow(clippy::cast_possible_truncation)]
    ser.serialize_u64(unix_time_value.as_millis() as u64)
}

pub const PEER_ID_BYTES_LEN: usize = 20;

/// Peer ID. The 20 bytes a client sends in the `peer_id` parameter.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Id(pub [u8; 20]);

/// Error returned when trying to convert an invalid peer id from another type.
///
/// Usually because the source format does not contain 20 bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdConversionError {
    #[error("not enough bytes for peer id: {message} {location}")]
    NotEnoughBytes {
        location: &'static Location<'static>,
        message: String,
    },
    #[error("too many bytes for peer id: {message} {location}")]
    TooManyBytes {
        location: &'static Location<'static>,
        message: String,
    },
}

impl From<[u8; 20]> for Id {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<i32> for Id {
    fn from(number: i32) -> Self {
        let number = number.to_le_bytes();
        let mut bytes = *b"-qB00000000000000000";
        bytes[16..].copy_from_slice(&number);
        Id(bytes)
    }
}

impl TryFrom<&[u8]> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < PEER_ID_BYTES_LEN {
            return Err(IdConversionError::NotEnoughBytes {
                location: Location::caller(),
                message: format! {"got {} bytes, expected {}", bytes.len(), PEER_ID_BYTES_LEN},
            });
        }
        if bytes.len() > PEER_ID_BYTES_LEN {
            return Err(IdConversionError::TooManyBytes {
                location: Location::caller(),
                message: format! {"got {} bytes, expected {}", bytes.len(), PEER_ID_BYTES_LEN},
            });
        }

        let mut data = [0u8; PEER_ID_BYTES_LEN];
        data.copy_from_slice(bytes);
        Ok(Self(data))
    }
}

impl TryFrom<Vec<u8>> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl std::fmt::Display for Id {
    /// Peer ids are usually printable (`-qB4250-...`), so they are shown as
    /// text. Bytes that are not valid UTF-8 are replaced.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Id {
    /// Converts to hex string.
    ///
    /// For the `PeerId` `-qB00000000000000000` it returns `0x2d71423030303030303030303030303030303030`
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let hex: String = self.0.iter().map(|byte| format!("{byte:02x}")).collect();
        format!("0x{hex}")
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

pub mod fixture {
    use super::{Id, Peer};
    use crate::DurationSinceUnixEpoch;

    #[derive(PartialEq, Debug)]
    pub struct PeerBuilder {
        peer: Peer,
    }

    #[allow(clippy::derivable_impls)]
    impl Default for PeerBuilder {
        fn default() -> Self {
            Self { peer: Peer::default() }
        }
    }

    impl PeerBuilder {
        #[allow(dead_code)]
        #[must_use]
        pub fn seeder() -> Self {
            let peer = Peer {
                peer_id: Id(*b"-qB00000000000000001"),
                ip: "127.0.0.1".to_string(),
                port: 8080,
                uploaded: 0,
                downloaded: 0,
                left: 0,
                last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
            };

            Self { peer }
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn leecher() -> Self {
            let peer = Peer {
                peer_id: Id(*b"-qB00000000000000002"),
                ip: "127.0.0.2".to_string(),
                port: 8080,
                uploaded: 0,
                downloaded: 0,
                left: 10,
                last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
            };

            Self { peer }
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_peer_id(mut self, peer_id: &Id) -> Self {
            self.peer.peer_id = *peer_id;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_ip(mut self, ip: &str) -> Self {
            ip.clone_into(&mut self.peer.ip);
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_port(mut self, port: u16) -> Self {
            self.peer.port = port;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn with_bytes_pending_to_download(mut self, left: u64) -> Self {
            self.peer.left = left;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn last_announced_on(mut self, last_announce: DurationSinceUnixEpoch) -> Self {
            self.peer.last_announce = last_announce;
            self
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn build(self) -> Peer {
            self.into()
        }

        #[allow(dead_code)]
        #[must_use]
        pub fn into(self) -> Peer {
            self.peer
        }
    }

    impl Default for Peer {
        fn default() -> Self {
            Self {
                peer_id: Id::default(),
                ip: "127.0.0.1".to_string(),
                port: 8080,
                uploaded: 0,
                downloaded: 0,
                left: 0,
                last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
            }
        }
    }

    impl Default for Id {
        fn default() -> Self {
            Self(*b"-qB00000000000000000")
        }
    }
}
