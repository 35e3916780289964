//! Module to handle the HTTP server instances.
use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;

use axum_server::Handle;
use derive_more::Constructor;
use swarm_tracker_located_error::{DynError, LocatedError};
use thiserror::Error;
use tokio::sync::oneshot::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::v1::routes::router;
use crate::bootstrap::jobs::Started;
use crate::core::Tracker;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Error that can occur when starting or stopping the HTTP server.
///
/// Some errors triggered while starting the server are:
///
/// - The socket can not be bound to the configured address.
/// - The spawned server does not report back that it started.
///
/// Some errors triggered while stopping the server are:
///
/// - The channel to send the halt signal to the server is closed.
/// - The server task did not run to completion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to bind the http tracker to {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("the http tracker stopped before reporting its address, {location}")]
    NotStarted { location: &'static Location<'static> },

    #[error("the http tracker halt channel is closed, {location}")]
    HaltChannelClosed { location: &'static Location<'static> },

    #[error("the http tracker task failed: {source}")]
    Task {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

/// A stopped HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type StoppedHttpServer = HttpServer<Stopped>;

/// A running HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type RunningHttpServer = HttpServer<Running>;

/// A HTTP server instance controller.
///
/// It's responsible for:
///
/// - Keeping the initial configuration of the server.
/// - Starting and stopping the server.
/// - Keeping the state of the server: `running` or `stopped`.
///
/// It's a state machine. The configuration is kept by the [`Launcher`] and
/// can not be changed: stopping and starting again binds the same address.
#[allow(clippy::module_name_repetitions)]
pub struct HttpServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped HTTP server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running HTTP server state.
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    pub halt_task: Sender<Halted>,
    pub task: JoinHandle<Launcher>,
}

impl HttpServer<Stopped> {
    /// It creates a new `HttpServer` controller in `stopped` state.
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `HttpServer` controller in `running`
    /// state.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the address can not be bound, or the server does
    /// not report back that it started.
    pub async fn start(self, tracker: Arc<Tracker>) -> Result<HttpServer<Running>, Error> {
        let (tx_start, rx_start) = tokio::sync::oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        let tcp_listener = self.state.launcher.bind()?;

        let task = self.state.launcher.start(tcp_listener, tracker, tx_start, rx_halt);

        let binding = rx_start
            .await
            .map_err(|_| Error::NotStarted {
                location: Location::caller(),
            })?
            .address;

        tracing::trace!(target: "HTTP TRACKER", "HttpServer<Stopped>::start: http://{binding} (running)");

        Ok(HttpServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl HttpServer<Running> {
    /// It stops the server and returns a `HttpServer` controller in `stopped`
    /// state.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the halt channel was closed, or the server task
    /// failed.
    pub async fn stop(self) -> Result<HttpServer<Stopped>, Error> {
        self.state
            .halt_task
            .send(Halted::Normal)
            .map_err(|_| Error::HaltChannelClosed {
                location: Location::caller(),
            })?;

        let launcher = self.state.task.await.map_err(|err| Error::Task {
            source: (Arc::new(err) as DynError).into(),
        })?;

        Ok(HttpServer {
            state: Stopped { launcher },
        })
    }
}

/// It binds and runs the tracker routes.
#[derive(Constructor, Clone, Debug)]
pub struct Launcher {
    pub bind_to: SocketAddr,
    pub path_key: Option<String>,
}

impl Launcher {
    fn bind(&self) -> Result<std::net::TcpListener, Error> {
        let to_bind_error = |err: std::io::Error| Error::Bind {
            address: self.bind_to,
            source: (Arc::new(err) as DynError).into(),
        };

        let tcp_listener = std::net::TcpListener::bind(self.bind_to).map_err(to_bind_error)?;
        tcp_listener.set_nonblocking(true).map_err(to_bind_error)?;

        Ok(tcp_listener)
    }

    /// It serves the tracker on the bound listener until it is halted.
    fn start(
        &self,
        tcp_listener: std::net::TcpListener,
        tracker: Arc<Tracker>,
        tx_start: Sender<Started>,
        rx_halt: Receiver<Halted>,
    ) -> JoinHandle<Launcher> {
        let launcher = self.clone();

        tokio::spawn(async move {
            let address = match tcp_listener.local_addr() {
                Ok(address) => address,
                Err(err) => {
                    error!(target: "HTTP TRACKER", "cannot read the bound address: {err}");
                    return launcher;
                }
            };

            let handle = Handle::new();

            tokio::task::spawn(graceful_shutdown(
                handle.clone(),
                rx_halt,
                format!("Shutting down HTTP tracker on http://{address}"),
            ));

            let app = router(tracker, launcher.path_key.as_deref(), &address);

            let running = axum_server::from_tcp(tcp_listener)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>());

            info!(target: "HTTP TRACKER", "Started on: http://{address}");

            if tx_start.send(Started { address }).is_err() {
                error!(target: "HTTP TRACKER", "the http tracker controller is gone");
                return launcher;
            }

            if let Err(err) = running.await {
                error!(target: "HTTP TRACKER", "the http tracker crashed: {err}");
            }

            info!(target: "HTTP TRACKER", "Stopped server running on: http://{address}");

            launcher
        })
    }
}
