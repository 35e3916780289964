//! The `event` parameter of an announce request.
use std::convert::Infallible;
use std::str::FromStr;

use derive_more::Display;
use serde::Serialize;

/// Announce events. Described on the
/// [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
///
/// The tracker only acts on `stopped`. Any value it does not know is kept
/// verbatim in [`AnnounceEvent::Other`] so it can still be reported.
#[derive(Hash, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AnnounceEvent {
    /// The peer has started downloading the torrent.
    #[display("started")]
    Started,
    /// The peer has ceased downloading the torrent.
    #[display("stopped")]
    Stopped,
    /// The peer has completed downloading the torrent.
    #[display("completed")]
    Completed,
    /// This is one of the announcements done at regular intervals.
    #[default]
    #[display("")]
    None,
    #[display("{_0}")]
    Other(String),
}

impl AnnounceEvent {
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self == AnnounceEvent::Stopped
    }
}

impl FromStr for AnnounceEvent {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw {
            "started" => Self::Started,
            "stopped" => Self::Stopped,
            "completed" => Self::Completed,
            "" => Self::None,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl Serialize for AnnounceEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
