//! `Announce` response for the HTTP tracker [`announce`](crate::servers::http::v1::requests::announce::Announce) request.
//!
//! Data structures and logic to build the `announce` response.
use axum::http::StatusCode;
use bencode::{ben_bytes, ben_int, ben_map, BencodeMut};
use swarm_tracker_primitives::peer;

use crate::core::AnnounceData;

/// The successful answer to an announce: how long the client has to wait
/// before the next regular announce, and the other peers of the swarm.
///
/// ```text
/// d8:intervali1800e5:peersld2:id20:-qB000000000000000012:ip9:126.0.0.14:porti8080eeee
/// ```
///
/// Refer to [BEP 03: The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
/// for more information.
#[derive(Debug, PartialEq, Eq)]
pub struct Announce {
    pub interval: i64,
    pub peers: Vec<NormalPeer>,
}

impl From<AnnounceData> for Announce {
    fn from(data: AnnounceData) -> Self {
        Self {
            interval: data.policy.interval.into(),
            peers: data.peers.into_iter().map(NormalPeer::from).collect(),
        }
    }
}

impl Announce {
    /// Returns the bencoded body.
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        (ben_map! {
            "interval" => ben_int!(self.interval),
            "peers" => self.peers.iter().map(BencodeMut::from).collect()
        })
        .encode()
    }
}

impl axum::response::IntoResponse for Announce {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, self.body()).into_response()
    }
}

/// A peer as listed in the announce response.
///
/// ```rust
/// use swarm_tracker::servers::http::v1::responses::announce::NormalPeer;
///
/// let peer = NormalPeer {
///     peer_id: *b"-qB00000000000000001",
///     ip: "105.105.105.105".to_string(),
///     port: 0x7070, // 28784
/// };
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct NormalPeer {
    pub peer_id: [u8; 20],
    /// The address as it was announced, or as the tracker observed it.
    pub ip: String,
    pub port: u16,
}

impl From<peer::Peer> for NormalPeer {
    fn from(peer: peer::Peer) -> Self {
        NormalPeer {
            peer_id: peer.peer_id.0,
            ip: peer.ip,
            port: peer.port,
        }
    }
}

impl From<&NormalPeer> for BencodeMut<'_> {
    fn from(value: &NormalPeer) -> Self {
        ben_map! {
            "id" => ben_bytes!(value.peer_id.to_vec()),
            "ip" => ben_bytes!(value.ip.clone()),
            "port" => ben_int!(i64::from(value.port))
        }
    }
}
