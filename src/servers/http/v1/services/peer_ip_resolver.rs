//! This service resolves the address stored for the announcing peer.
//!
//! A client may tell the tracker where it wants to be reached with the `ip`
//! param. That value is stored as it was sent, without validation. When the
//! param is absent the tracker uses the address it observed for the request.
//!
//! Given this request chain:
//!
//! ```text
//! client          <-> http proxy 1                 <-> http proxy 2                          <-> server
//! ip: 126.0.0.1       ip: 126.0.0.2                    ip: 126.0.0.3                             ip: 126.0.0.4
//!                     X-Forwarded-For: 126.0.0.1       X-Forwarded-For: 126.0.0.1,126.0.0.2
//! ```
//!
//! the observed address is one of:
//!
//! ```text
//! right_most_x_forwarded_for = 126.0.0.2
//! connection_info_ip         = 126.0.0.3
//! ```
//!
//! depending on the `on_reverse_proxy` option.
use std::net::IpAddr;
use std::panic::Location;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// This struct contains the sources from which the client IP can be obtained.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct ClientIpSources {
    /// The right most IP from the `X-Forwarded-For` HTTP header.
    pub right_most_x_forwarded_for: Option<IpAddr>,
    /// The IP from the connection info.
    pub connection_info_ip: Option<IpAddr>,
}

/// The error that can occur when resolving the peer IP.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeerIpResolutionError {
    /// The tracker is configured to run behind a reverse proxy but the
    /// `X-Forwarded-For` HTTP header is missing or invalid.
    #[error("missing or invalid the right most X-Forwarded-For IP (mandatory on reverse proxy tracker configuration) in {location}")]
    MissingRightMostXForwardedForIp { location: &'static Location<'static> },
    /// The connection info was not provided to the router.
    #[error("cannot get the client IP from the connection info in {location}")]
    MissingClientIp { location: &'static Location<'static> },
}

/// Resolves the address to store for the announcing peer.
///
/// ```rust
/// use std::net::IpAddr;
/// use std::str::FromStr;
///
/// use swarm_tracker::servers::http::v1::services::peer_ip_resolver::{resolve, ClientIpSources};
///
/// let sources = ClientIpSources {
///     right_most_x_forwarded_for: None,
///     connection_info_ip: Some(IpAddr::from_str("203.0.113.195").unwrap()),
/// };
///
/// assert_eq!(resolve(false, None, &sources).unwrap(), "203.0.113.195");
/// assert_eq!(resolve(false, Some("peer.example.com"), &sources).unwrap(), "peer.example.com");
/// ```
///
/// # Errors
///
/// Will return an error if the `ip` param is absent and the observed address
/// can not be obtained according to the configuration.
#[track_caller]
pub fn resolve(
    on_reverse_proxy: bool,
    announced_ip: Option<&str>,
    client_ip_sources: &ClientIpSources,
) -> Result<String, PeerIpResolutionError> {
    if let Some(ip) = announced_ip {
        return Ok(ip.to_owned());
    }

    client_ip(on_reverse_proxy, client_ip_sources).map(|ip| ip.to_string())
}

/// Resolves the address the request came from.
///
/// # Errors
///
/// Will return an error if the address can not be obtained according to the
/// configuration. For example, if the tracker is behind a reverse proxy and
/// the `X-Forwarded-For` header is missing.
#[track_caller]
pub fn client_ip(on_reverse_proxy: bool, client_ip_sources: &ClientIpSources) -> Result<IpAddr, PeerIpResolutionError> {
    if on_reverse_proxy {
        client_ip_sources
            .right_most_x_forwarded_for
            .ok_or(PeerIpResolutionError::MissingRightMostXForwardedForIp {
                location: Location::caller(),
            })
    } else {
        client_ip_sources
            .connection_info_ip
            .ok_or(PeerIpResolutionError::MissingClientIp {
                location: Location::caller(),
            })
    }
}
