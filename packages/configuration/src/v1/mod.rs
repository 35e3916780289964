//! Version `1` of the configuration.
//!
//! The default configuration, as TOML:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//! style = "full"
//!
//! [core]
//! inactive_peer_cleanup_interval = 0
//! allowed_info_hashes = []
//!
//! [core.announce_policy]
//! interval = 1800
//!
//! [core.tracker_policy]
//! max_peer_timeout = 1800
//! max_peers_per_response = 50
//!
//! [http_tracker]
//! bind_address = "0.0.0.0:7070"
//! on_reverse_proxy = false
//! legacy_failure_codes = false
//!
//! [telemetry]
//! url = "https://http-intake.logs.datadoghq.com/api/v2/logs"
//! service = "tracker"
//! hostname = "swarm-tracker"
//! tags = "env:prod"
//! ```
//!
//! `core.allowed_info_hashes` also accepts a comma separated string, which
//! is the natural shape for the `ALLOWED_INFO_HASHES` variable:
//!
//! ```text
//! ALLOWED_INFO_HASHES=9c38422213e30bff212b30c360d26f9a02136422,3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0
//! ```
pub mod core;
pub mod http_tracker;
mod lenient;
pub mod logging;
pub mod telemetry;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::Uncased;
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::http_tracker::HttpTracker;
use self::logging::Logging;
use self::telemetry::Telemetry;
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR, SWARM_PEERS_LIMIT};

/// Environment variables accepted without the prefix, and the option each
/// one sets.
const SHORT_ENV_VARS: [(&str, &str); 3] = [
    ("ALLOWED_INFO_HASHES", "core.allowed_info_hashes"),
    ("PATH_KEY", "http_tracker.path_key"),
    ("DD_API_KEY", "telemetry.api_key"),
];

/// Core configuration for the tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Core configuration.
    #[serde(default)]
    pub core: Core,

    /// The HTTP tracker configuration.
    #[serde(default)]
    pub http_tracker: HttpTracker,

    /// Announce event shipping.
    #[serde(default)]
    pub telemetry: Telemetry,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct, then applies the
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sources can not be merged, or if the merged
    /// configuration is not valid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            // Config in env var has priority over config file path
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::string(config_toml))
        } else {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment
            .merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR))
            .merge(Self::short_env_vars());

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    fn short_env_vars() -> Env {
        Env::raw()
            .only(&SHORT_ENV_VARS.map(|(name, _)| name))
            .map(|name| {
                SHORT_ENV_VARS
                    .iter()
                    .find(|(short, _)| name.as_str().eq_ignore_ascii_case(short))
                    .map_or_else(|| Uncased::from(name.as_str().to_owned()), |(_, key)| Uncased::from(*key))
            })
    }

    /// Returns a copy of the configuration with the secrets replaced, safe
    /// to print.
    #[must_use]
    pub fn mask_secrets(mut self) -> Self {
        if self.telemetry.api_key.is_some() {
            self.telemetry.api_key = Some("***".to_string());
        }
        self
    }

    /// Encodes the configuration to JSON.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("Could not encode JSON value")
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if self.core.announce_policy.interval == 0 {
            return Err(SemanticValidationError::ZeroAnnounceInterval);
        }

        if self.core.tracker_policy.max_peers_per_response == 0 {
            return Err(SemanticValidationError::ZeroPeersPerResponse);
        }

        if self.core.tracker_policy.max_peers_per_response > SWARM_PEERS_LIMIT {
            return Err(SemanticValidationError::TooManyPeersPerResponse {
                max_peers_per_response: self.core.tracker_policy.max_peers_per_response,
                limit: SWARM_PEERS_LIMIT,
            });
        }

        // Only unreserved URL characters: the key is nested as a literal route segment.
        if let Some(path_key) = self.http_tracker.path_key() {
            if !path_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
            {
                return Err(SemanticValidationError::PathKeyIsNotASegment {
                    path_key: path_key.to_owned(),
                });
            }
        }

        Ok(())
    }
}
