//! Job that runs a task on intervals to clean up the swarms.
//!
//! It removes inactive peers and then the swarms left without peers.
//!
//! **Inactive peers** are peers that have not announced for more than
//! `max_peer_timeout` seconds. Announces already sweep the swarm they touch,
//! this job only reaches swarms that stopped receiving announces.
//!
//! The job is disabled when `inactive_peer_cleanup_interval` is `0`.
use std::sync::Arc;

use chrono::Utc;
use swarm_tracker_configuration::Core;
use tokio::task::JoinHandle;
use tracing::info;

use crate::core;

/// It starts a job for cleaning up the swarms of the tracker.
///
/// The cleaning task is executed every `inactive_peer_cleanup_interval`
/// seconds. It returns `None` when the interval is `0`.
#[must_use]
pub fn start_job(config: &Core, tracker: &Arc<core::Tracker>) -> Option<JoinHandle<()>> {
    if config.inactive_peer_cleanup_interval == 0 {
        info!("Note: Not starting the swarm cleanup job, it is disabled in the configuration.");
        return None;
    }

    let weak_tracker = std::sync::Arc::downgrade(tracker);
    let interval = config.inactive_peer_cleanup_interval;

    Some(tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping swarm cleanup job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(tracker) = weak_tracker.upgrade() {
                        let start_time = Utc::now().time();
                        info!("Cleaning up swarms..");
                        tracker.cleanup_swarms().await;
                        info!("Cleaned up swarms in: {}ms", (Utc::now().time() - start_time).num_milliseconds());
                    } else {
                        break;
                    }
                }
            }
        }
    }))
}
