//! Tracker domain services.
use swarm_tracker_configuration::Configuration;

use crate::core::telemetry::Keeper;
use crate::core::Tracker;

/// It returns a new tracker building its dependencies.
///
/// The telemetry listener is only started when an API key is configured. It
/// has to be called from inside a `tokio` runtime in that case.
#[must_use]
pub fn tracker_factory(config: &Configuration) -> Tracker {
    let telemetry_event_sender = Keeper::new_active_instance(&config.telemetry);

    Tracker::new(config, telemetry_event_sender)
}
