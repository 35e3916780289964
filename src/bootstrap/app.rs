//! Setup for the main tracker application.
//!
//! The [`setup`] only builds the application and its dependencies but it does
//! not start the application. In fact, there is no such thing as the main
//! application process. When the application starts, the only thing it does is
//! starting a bunch of independent jobs. If you are looking for how things are
//! started you should read [`app::start`](crate::app::start) function
//! documentation.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Initialize the domain tracker.
use std::sync::Arc;

use swarm_tracker_clock::static_time;
use swarm_tracker_configuration::{Configuration, Info};
use tracing::info;

use super::logging;
use crate::core::services::tracker_factory;
use crate::core::Tracker;

/// Path of the configuration file used when no other path is given.
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/tracker.toml";

/// It loads the configuration and builds the tracker.
///
/// # Panics
///
/// Setup can fail if the configuration is invalid.
#[must_use]
pub fn setup() -> (Configuration, Arc<Tracker>) {
    let configuration = initialize_configuration();

    let tracker = initialize_with_configuration(&configuration);

    info!("Configuration:\n{}", configuration.clone().mask_secrets().to_json());

    (configuration, tracker)
}

/// It initializes the application with the given configuration.
///
/// The configuration may be obtained from the environment (via config file or env vars).
#[must_use]
pub fn initialize_with_configuration(configuration: &Configuration) -> Arc<Tracker> {
    initialize_static();
    logging::setup(configuration);
    Arc::new(tracker_factory(configuration))
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started, used by the stopped clock.
pub fn initialize_static() {
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It loads the application configuration from the environment.
///
/// There are two methods to inject the configuration:
///
/// 1. By using a config file: `tracker.toml`.
/// 2. Environment variable: `SWARM_TRACKER_CONFIG_TOML`. The variable contains the same contents as the `tracker.toml` file.
///
/// Environment variable has priority over the config file.
///
/// Refer to the [configuration documentation](https://docs.rs/swarm-tracker-configuration) for the configuration options.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either
/// `./share/default/config/tracker.toml` file or the env var `SWARM_TRACKER_CONFIG_TOML`.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string()).expect("it should load configuration info");

    Configuration::load(&info).expect("it should load the tracker configuration")
}
