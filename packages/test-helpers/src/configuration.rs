//! Tracker configuration factories for tests.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use swarm_tracker_configuration::{Configuration, Threshold};
use swarm_tracker_primitives::info_hash::InfoHash;

/// This configuration is used for testing. It binds the HTTP tracker to an
/// ephemeral port so more than one tracker can run at the same time, and it
/// never ships telemetry.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    // Ephemeral socket address for HTTP tracker
    config.http_tracker.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);

    config.telemetry.api_key = None;

    config
}

/// Ephemeral configuration that only serves the given torrents.
#[must_use]
pub fn ephemeral_with_allowed_info_hashes(info_hashes: &[InfoHash]) -> Configuration {
    let mut config = ephemeral();

    config.core.allowed_info_hashes = info_hashes.to_vec();

    config
}

/// Ephemeral configuration that answers only under `/<path_key>/`.
#[must_use]
pub fn ephemeral_with_path_key(path_key: &str) -> Configuration {
    let mut config = ephemeral();

    config.http_tracker.path_key = Some(path_key.to_owned());

    config
}

/// Ephemeral configuration for a tracker behind a reverse proxy.
#[must_use]
pub fn ephemeral_with_reverse_proxy() -> Configuration {
    let mut config = ephemeral();

    config.http_tracker.on_reverse_proxy = true;

    config
}

/// Ephemeral configuration answering failures with numeric codes.
#[must_use]
pub fn ephemeral_with_legacy_failure_codes() -> Configuration {
    let mut config = ephemeral();

    config.http_tracker.legacy_failure_codes = true;

    config
}
