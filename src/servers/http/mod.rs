//! HTTP Tracker.
//!
//! This module contains the HTTP tracker implementation.
//!
//! The HTTP tracker is a simple HTTP server that responds to two `GET`
//! requests:
//!
//! - `Announce`: used to announce the presence of a peer to the tracker.
//! - `Swarm`: a JSON listing of the peers of a torrent, for inspection.
//!
//! When the `http_tracker.path_key` option is set, both paths are only served
//! under `/<path_key>/`. Any other path is a `404 not found`.
//!
//! ## Announce
//!
//! `Announce` requests are used to announce the presence of a peer to the
//! tracker. The tracker responds with a list of the other peers of the same
//! swarm, encoded in [bencoded](https://en.wikipedia.org/wiki/Bencode) format.
//!
//! **Query parameters**
//!
//! Parameter | Type | Description | Required | Default | Example
//! ---|---|---|---|---|---
//! [`info_hash`](crate::servers::http::v1::requests::announce::Announce::info_hash) | percent encoded 20-byte array | The `Info Hash` of the torrent. | Yes | No | `%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0`
//! [`peer_id`](crate::servers::http::v1::requests::announce::Announce::peer_id) | 20 characters | The ID of the peer. | Yes | No | `-qB00000000000000001`
//! [`port`](crate::servers::http::v1::requests::announce::Announce::port) | positive integer | The port used by the peer. | Yes | No | `17548`
//! [`uploaded`](crate::servers::http::v1::requests::announce::Announce::uploaded) | positive integer | The number of bytes uploaded by the peer. | No | `0` | `0`
//! [`downloaded`](crate::servers::http::v1::requests::announce::Announce::downloaded) | positive integer | The number of bytes downloaded by the peer. | No | `0` | `0`
//! [`left`](crate::servers::http::v1::requests::announce::Announce::left) | positive integer | The number of bytes pending to download. | No | `0` | `0`
//! [`event`](crate::servers::http::v1::requests::announce::Announce::event) | string | `started`, `completed`, `stopped`. A `stopped` peer is removed from the swarm. | No | None | `completed`
//! [`ip`](crate::servers::http::v1::requests::announce::Announce::ip) | string | The address other peers should use. | No | the client address | `2.137.87.41`
//!
//! > **NOTICE**: the `info_hash` parameter is NOT a `URL` encoded string param.
//! It is the percent encoding of the raw 20 bytes. Check the
//! [`percent_encoding`] module to know more about the decoding.
//!
//! > **NOTICE**: the `peer_id` is taken as it is sent, without decoding, and it
//! must be exactly 20 bytes long.
//!
//! > **NOTICE**: when no `ip` is sent, the tracker uses the address of the
//! connection, or the right-most address in the `X-Forwarded-For` header if
//! `http_tracker.on_reverse_proxy` is enabled.
//!
//! **Sample announce URL**
//!
//! <http://0.0.0.0:7070/announce?info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0&peer_id=-qB00000000000000001&port=17548&left=0&event=started>
//!
//! **Sample response**
//!
//! ```text
//! d8:intervali1800e5:peersld2:id20:-qB000000000000000022:ip9:126.0.0.24:porti6881eeee
//! ```
//!
//! Which, once decoded, is:
//!
//! ```json
//! {
//!    "interval": 1800,
//!    "peers": [
//!       {
//!          "id": "-qB00000000000000002",
//!          "ip": "126.0.0.2",
//!          "port": 6881
//!       }
//!    ]
//! }
//! ```
//!
//! The peer sending the announce is never part of its own list, and at most
//! `50` peers are returned.
//!
//! **Failures**
//!
//! Invalid requests are answered with a `200 OK` and a bencoded failure:
//!
//! ```text
//! d14:failure reason17:missing info_hashe
//! ```
//!
//! With `http_tracker.legacy_failure_codes` enabled the body carries the
//! numeric code instead: `d12:failure codei101ee`.
//!
//! Failure | Code
//! ---|---
//! `missing info_hash` | 101
//! `missing peer_id` | 102
//! `missing port` | 103
//! `invalid info_hash length` | 150
//! `invalid peer_id length` | 151
//!
//! A torrent outside the allow-list is a `404 not found` (or
//! `d12:failure codei200ee` with legacy failure codes).
//!
//! ## Swarm
//!
//! `GET /<info_hash>`, with the info hash as 40 hex characters, returns the
//! peers of the swarm as a JSON array. Refer to
//! [`handlers::swarm`](crate::servers::http::v1::handlers::swarm).
pub mod percent_encoding;
pub mod server;
pub mod v1;
