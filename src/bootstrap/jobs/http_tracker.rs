//! HTTP tracker job starter.
//!
//! The function [`http_tracker::start_job`](crate::bootstrap::jobs::http_tracker::start_job)
//! starts the HTTP tracker server.
//!
//! The server itself runs on a spawned task, the "**launcher**". The launcher
//! binds the socket and sends a message back with the bound address once the
//! server is accepting connections.
use std::sync::Arc;

use swarm_tracker_configuration::HttpTracker;
use tokio::task::JoinHandle;
use tracing::info;

use crate::core;
use crate::servers::http::server::{HttpServer, Launcher};

/// It starts the HTTP tracker and returns a handle that resolves when the
/// server stops.
///
/// # Panics
///
/// It would panic if the configured address can not be bound, or if the
/// server task can not be joined.
pub async fn start_job(config: &HttpTracker, tracker: Arc<core::Tracker>) -> JoinHandle<()> {
    let launcher = Launcher::new(config.bind_address, config.path_key().map(ToString::to_string));

    let server = HttpServer::new(launcher)
        .start(tracker)
        .await
        .expect("it should be able to start the http tracker");

    info!(target: "HTTP TRACKER", "Listening on http://{}", server.state.binding);

    tokio::spawn(async move {
        server
            .state
            .task
            .await
            .expect("it should be able to join to the http tracker task");
    })
}
