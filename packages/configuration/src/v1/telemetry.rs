use serde::{Deserialize, Serialize};
use url::Url;

use super::lenient::option_string;

/// Where announce events are shipped. Nothing is sent without an API key.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Telemetry {
    /// The log intake API key. Sent in the `DD-API-KEY` header.
    #[serde(default, deserialize_with = "option_string")]
    pub api_key: Option<String>,

    #[serde(default = "Telemetry::default_url")]
    pub url: Url,

    #[serde(default = "Telemetry::default_service")]
    pub service: String,

    #[serde(default = "Telemetry::default_hostname")]
    pub hostname: String,

    /// Comma separated `key:value` tags attached to every event.
    #[serde(default = "Telemetry::default_tags")]
    pub tags: String,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            api_key: None,
            url: Self::default_url(),
            service: Self::default_service(),
            hostname: Self::default_hostname(),
            tags: Self::default_tags(),
        }
    }
}

impl Telemetry {
    fn default_url() -> Url {
        Url::parse("https://http-intake.logs.datadoghq.com/api/v2/logs").expect("the default telemetry url should be valid")
    }

    fn default_service() -> String {
        "tracker".to_string()
    }

    fn default_hostname() -> String {
        "swarm-tracker".to_string()
    }

    fn default_tags() -> String {
        "env:prod".to_string()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}
