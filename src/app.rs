//! Swarm Tracker application.
//!
//! The tracker application has a global configuration for its jobs. It's
//! basically a container for other services.
//!
//! Jobs executed always:
//!
//! - HTTP tracker: the announce endpoint and the swarm listing.
//!
//! Optional jobs:
//!
//! - Swarm cleaner: it removes inactive peers and peerless swarms on an
//!   interval, only when `core.inactive_peer_cleanup_interval` is not `0`.
use std::sync::Arc;

use swarm_tracker_configuration::Configuration;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::{http_tracker, swarm_cleanup};
use crate::core;

/// It starts the application jobs and returns their handles.
///
/// # Panics
///
/// Will panic if the HTTP tracker can not bind its address.
pub async fn start(config: &Configuration, tracker: Arc<core::Tracker>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    // Start the HTTP tracker
    jobs.push(http_tracker::start_job(&config.http_tracker, tracker.clone()).await);

    // Start the swarm cleanup job
    if let Some(job) = swarm_cleanup::start_job(&config.core, &tracker) {
        jobs.push(job);
    }

    jobs
}
