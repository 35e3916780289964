//! Best effort shipping of tracker events to a log intake.
//!
//! Shipping follows an `event-sender -> event listener` model. The tracker
//! hands every [`Event`] to an [`EventSender`] without waiting. A single
//! listener task, started by the [`Keeper`], receives the events and `POST`s
//! them as JSON to the configured intake:
//!
//! ```text
//! POST <telemetry.url>
//! Content-Type: application/json
//! DD-API-KEY: <telemetry.api_key>
//!
//! [{"message":{"type":"announce","values":{...}},"hostname":"swarm-tracker","service":"tracker","ddtags":"env:prod"}]
//! ```
//!
//! A failed delivery is logged and the event is dropped. Telemetry never
//! delays nor fails an announce.
use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

use serde::Serialize;
use swarm_tracker_configuration::Telemetry;
use swarm_tracker_located_error::{DynError, LocatedError};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

const CHANNEL_BUFFER_SIZE: usize = 65_535;

/// An event shipped to the log intake. The variant name is sent in the `type`
/// field.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// An announce request that passed the extraction and the allow-list.
    Announce { values: AnnounceValues },
}

/// What is reported about an announce.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnnounceValues {
    pub peer_id: peer::Id,
    pub info_hash: InfoHash,
    /// `null` when the client did not send an event.
    pub event: Option<AnnounceEvent>,
    pub ip: String,
    pub port: u16,
    pub uploaded: u64,
    pub downloaded: u64,
    pub left: u64,
}

impl Event {
    #[must_use]
    pub fn announce(info_hash: &InfoHash, peer: &peer::Peer, event: &AnnounceEvent) -> Self {
        Event::Announce {
            values: AnnounceValues {
                peer_id: peer.peer_id,
                info_hash: *info_hash,
                event: match event {
                    AnnounceEvent::None => None,
                    other => Some(other.clone()),
                },
                ip: peer.ip.clone(),
                port: peer.port,
                uploaded: peer.uploaded,
                downloaded: peer.downloaded,
                left: peer.left,
            },
        }
    }
}

/// One entry of the intake request body.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub message: &'a Event,
    pub hostname: &'a str,
    pub service: &'a str,
    pub ddtags: &'a str,
}

impl<'a> LogEntry<'a> {
    #[must_use]
    pub fn new(message: &'a Event, config: &'a Telemetry) -> Self {
        Self {
            message,
            hostname: &config.hostname,
            service: &config.service,
            ddtags: &config.tags,
        }
    }
}

/// Errors shipping an event.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("telemetry is disabled, no api key was configured, {location}")]
    MissingApiKey { location: &'static Location<'static> },

    #[error("failed to ship the event to {url}: {source}")]
    Delivery {
        url: String,
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

/// A trait to allow sending telemetry events.
pub trait EventSender: Sync + Send {
    /// Queues the event for shipping. It never waits.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the queue is full or the listener is gone. The
    /// event is given back in the error.
    fn send_event(&self, event: Event) -> Result<(), TrySendError<Event>>;
}

/// An [`EventSender`] implementation over a bounded channel. The channel is
/// created by a [`Keeper`].
pub struct Sender {
    sender: mpsc::Sender<Event>,
}

impl EventSender for Sender {
    fn send_event(&self, event: Event) -> Result<(), TrySendError<Event>> {
        self.sender.try_send(event)
    }
}

/// It listens to telemetry events and ships them.
pub struct Keeper {
    config: Arc<Telemetry>,
    client: reqwest::Client,
}

impl Keeper {
    #[must_use]
    pub fn new(config: &Telemetry) -> Self {
        Self {
            config: Arc::new(config.clone()),
            client: reqwest::Client::new(),
        }
    }

    /// Starts the listener when telemetry is enabled, and returns the sender
    /// the tracker has to use.
    #[must_use]
    pub fn new_active_instance(config: &Telemetry) -> Option<Box<dyn EventSender>> {
        if config.is_enabled() {
            Some(Self::new(config).run_event_listener())
        } else {
            None
        }
    }

    pub fn run_event_listener(self) -> Box<dyn EventSender> {
        let (sender, receiver) = mpsc::channel::<Event>(CHANNEL_BUFFER_SIZE);

        tokio::spawn(async move { event_listener(receiver, self).await });

        Box::new(Sender { sender })
    }

    /// Ships one event to the intake.
    ///
    /// # Errors
    ///
    /// Will return `Err` if there is no api key, if the request can not be
    /// sent, or if the intake answers with an error status.
    #[track_caller]
    pub fn ship<'a>(&'a self, event: &'a Event) -> impl Future<Output = Result<(), Error>> + 'a {
        let location = Location::caller();

        async move {
            let Some(api_key) = &self.config.api_key else {
                return Err(Error::MissingApiKey { location });
            };

            let body = [LogEntry::new(event, &self.config)];

            self.client
                .post(self.config.url.clone())
                .header("DD-API-KEY", api_key)
                .json(&body)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|err| Error::Delivery {
                    url: self.config.url.to_string(),
                    source: (Arc::new(err) as DynError).into(),
                })?;

            Ok(())
        }
    }
}

async fn event_listener(mut receiver: mpsc::Receiver<Event>, keeper: Keeper) {
    while let Some(event) = receiver.recv().await {
        match keeper.ship(&event).await {
            Ok(()) => debug!(target: "TELEMETRY", "shipped: {event:?}"),
            Err(err) => warn!(target: "TELEMETRY", "{err}"),
        }
    }
}
