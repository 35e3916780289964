//! Configuration data structures for the swarm tracker.
//!
//! The configuration is merged from, in increasing priority:
//!
//! 1. the defaults of every section,
//! 2. a TOML document, taken from the `SWARM_TRACKER_CONFIG_TOML` environment
//!    variable or, when that is not set, read from the file named by
//!    `SWARM_TRACKER_CONFIG_TOML_PATH` (the default path is used when the
//!    variable is not set, and a missing file is not an error),
//! 3. environment variables prefixed with `SWARM_TRACKER_`, where `__`
//!    separates nested keys (`SWARM_TRACKER_HTTP_TRACKER__PATH_KEY`),
//! 4. the short variables `ALLOWED_INFO_HASHES`, `PATH_KEY` and `DD_API_KEY`.
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::sync::Arc;

use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use swarm_tracker_located_error::{DynError, Located, LocatedError};
use thiserror::Error;

use crate::validator::SemanticValidationError;

/// The maximum number of peers returned by an announce.
pub const SWARM_PEERS_LIMIT: usize = 50;

/// Peers that did not announce for longer than this many seconds are removed
/// from their swarm.
pub const PEER_INACTIVITY_WINDOW_SECS: u32 = 1800;

// Environment variables

/// The whole `tracker.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "SWARM_TRACKER_CONFIG_TOML";

/// The `tracker.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "SWARM_TRACKER_CONFIG_TOML_PATH";

/// Prefix of the environment variables that override single options.
const CONFIG_OVERRIDE_PREFIX: &str = "SWARM_TRACKER_";

/// Separator between nested keys in the override variables.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

pub type Configuration = v1::Configuration;
pub type Core = v1::core::Core;
pub type HttpTracker = v1::http_tracker::HttpTracker;
pub type Logging = v1::logging::Logging;
pub type Telemetry = v1::telemetry::Telemetry;
pub type Threshold = v1::logging::Threshold;
pub type LogStyle = v1::logging::Style;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Constructor)]
pub struct TrackerPolicy {
    /// Maximum time in seconds that a peer can be inactive before being
    /// considered an inactive peer. Inactive peers are removed from their
    /// swarm on the next announce to that swarm.
    #[serde(default = "TrackerPolicy::default_max_peer_timeout")]
    pub max_peer_timeout: u32,

    /// Maximum number of peers returned in a single announce response.
    #[serde(default = "TrackerPolicy::default_max_peers_per_response")]
    pub max_peers_per_response: usize,
}

impl Default for TrackerPolicy {
    fn default() -> Self {
        Self {
            max_peer_timeout: Self::default_max_peer_timeout(),
            max_peers_per_response: Self::default_max_peers_per_response(),
        }
    }
}

impl TrackerPolicy {
    fn default_max_peer_timeout() -> u32 {
        PEER_INACTIVITY_WINDOW_SECS
    }

    fn default_max_peers_per_response() -> usize {
        SWARM_PEERS_LIMIT
    }
}

/// Announce policy
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Constructor)]
pub struct AnnouncePolicy {
    /// Interval in seconds that the client should wait between sending regular
    /// announce requests to the tracker. It is sent back in every successful
    /// announce response.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        1800
    }
}

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading extra configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading extra configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading extra configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to merge or deserialize the configuration sources.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// The configuration was read but its values can not be used together.
    #[error("Invalid configuration: {source}")]
    SemanticValidation {
        source: LocatedError<'static, SemanticValidationError>,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

impl From<SemanticValidationError> for Error {
    #[track_caller]
    fn from(err: SemanticValidationError) -> Self {
        Self::SemanticValidation {
            source: Located(err).into(),
        }
    }
}
