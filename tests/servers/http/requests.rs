//! Announce query builder for the tests.
use std::fmt;

use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
use swarm_tracker_primitives::info_hash::InfoHash;

use crate::common::fixtures::sample_info_hash;

/// The query of an announce request.
///
/// The `info_hash` is written as the percent encoding of its raw bytes, the
/// `peer_id` is written as it is.
pub struct Query {
    pub info_hash: Option<[u8; 20]>,
    pub peer_id: Option<String>,
    pub port: Option<u16>,
    pub uploaded: Option<u64>,
    pub downloaded: Option<u64>,
    pub left: Option<u64>,
    pub event: Option<String>,
    pub ip: Option<String>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<String> = vec![];

        if let Some(info_hash) = &self.info_hash {
            params.push(format!("info_hash={}", percent_encode(info_hash, NON_ALPHANUMERIC)));
        }
        if let Some(peer_id) = &self.peer_id {
            params.push(format!("peer_id={peer_id}"));
        }
        if let Some(port) = self.port {
            params.push(format!("port={port}"));
        }
        if let Some(uploaded) = self.uploaded {
            params.push(format!("uploaded={uploaded}"));
        }
        if let Some(downloaded) = self.downloaded {
            params.push(format!("downloaded={downloaded}"));
        }
        if let Some(left) = self.left {
            params.push(format!("left={left}"));
        }
        if let Some(event) = &self.event {
            params.push(format!("event={event}"));
        }
        if let Some(ip) = &self.ip {
            params.push(format!("ip={ip}"));
        }

        write!(f, "{}", params.join("&"))
    }
}

pub struct QueryBuilder {
    query: Query,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        let default_announce_query = Query {
            info_hash: Some(sample_info_hash().0),
            peer_id: Some("-qB00000000000000001".to_string()),
            port: Some(17548),
            uploaded: Some(0),
            downloaded: Some(0),
            left: Some(0),
            event: Some("started".to_string()),
            ip: None,
        };
        Self {
            query: default_announce_query,
        }
    }
}

#[allow(dead_code)]
impl QueryBuilder {
    pub fn with_info_hash(mut self, info_hash: &InfoHash) -> Self {
        self.query.info_hash = Some(info_hash.0);
        self
    }

    pub fn with_peer_id(mut self, peer_id: &str) -> Self {
        self.query.peer_id = Some(peer_id.to_string());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.query.port = Some(port);
        self
    }

    pub fn with_event(mut self, event: &str) -> Self {
        self.query.event = Some(event.to_string());
        self
    }

    pub fn with_ip(mut self, ip: &str) -> Self {
        self.query.ip = Some(ip.to_string());
        self
    }

    pub fn without_info_hash(mut self) -> Self {
        self.query.info_hash = None;
        self
    }

    pub fn without_peer_id(mut self) -> Self {
        self.query.peer_id = None;
        self
    }

    pub fn without_port(mut self) -> Self {
        self.query.port = None;
        self
    }

    pub fn query(self) -> Query {
        self.query
    }
}
