use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use super::lenient::option_string;

/// Configuration for the HTTP tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct HttpTracker {
    /// The address the tracker will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:7070`. If you want the
    /// operating system to choose a random port, use port `0`.
    #[serde(default = "HttpTracker::default_bind_address")]
    pub bind_address: SocketAddr,

    /// An optional secret path segment. When set, the tracker only answers
    /// under `/<path_key>/announce` and `/<path_key>/<info_hash>`.
    #[serde(default, deserialize_with = "option_string")]
    pub path_key: Option<String>,

    /// Weather the tracker is behind a reverse proxy or not.
    /// If the tracker is behind a reverse proxy, the right most address of
    /// the `X-Forwarded-For` header is used as the client IP address.
    #[serde(default = "HttpTracker::default_on_reverse_proxy")]
    pub on_reverse_proxy: bool,

    /// Answer announce failures with the numeric `failure code` body instead
    /// of the `failure reason` text.
    #[serde(default = "HttpTracker::default_legacy_failure_codes")]
    pub legacy_failure_codes: bool,
}

impl Default for HttpTracker {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            path_key: None,
            on_reverse_proxy: Self::default_on_reverse_proxy(),
            legacy_failure_codes: Self::default_legacy_failure_codes(),
        }
    }
}

impl HttpTracker {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 7070)
    }

    fn default_on_reverse_proxy() -> bool {
        false
    }

    fn default_legacy_failure_codes() -> bool {
        false
    }

    /// The path key, if one is configured. An empty key means no key.
    #[must_use]
    pub fn path_key(&self) -> Option<&str> {
        self.path_key.as_deref().filter(|key| !key.is_empty())
    }
}
