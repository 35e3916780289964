use std::sync::Arc;

use swarm_tracker::bootstrap::app::initialize_with_configuration;
use swarm_tracker::core::Tracker;
use swarm_tracker::servers::http::server::{HttpServer, Launcher, Running, Stopped};
use swarm_tracker_configuration::{Configuration, HttpTracker};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer;

pub struct Environment<S> {
    pub config: Arc<HttpTracker>,
    pub tracker: Arc<Tracker>,
    pub server: HttpServer<S>,
}

impl<S> Environment<S> {
    /// Adds a peer to the swarm of a torrent, as if it had announced.
    pub async fn add_swarm_peer(&self, info_hash: &InfoHash, peer: &peer::Peer) {
        self.tracker.announce(info_hash, peer, &AnnounceEvent::Started).await;
    }
}

impl Environment<Stopped> {
    #[allow(dead_code)]
    pub fn new(configuration: &Configuration) -> Self {
        let tracker = initialize_with_configuration(configuration);

        let config = Arc::new(configuration.http_tracker.clone());

        let server = HttpServer::new(Launcher::new(config.bind_address, config.path_key().map(ToString::to_string)));

        Self { config, tracker, server }
    }

    #[allow(dead_code)]
    pub async fn start(self) -> Environment<Running> {
        Environment {
            config: self.config,
            tracker: self.tracker.clone(),
            server: self.server.start(self.tracker).await.unwrap(),
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Configuration) -> Self {
        Environment::<Stopped>::new(configuration).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        Environment {
            config: self.config,
            tracker: self.tracker,
            server: self.server.stop().await.unwrap(),
        }
    }

    pub fn bind_address(&self) -> &std::net::SocketAddr {
        &self.server.state.binding
    }
}
