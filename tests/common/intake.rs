//! A fake log intake. It records the requests the tracker ships its
//! telemetry events to.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// One request received by the intake.
#[derive(Debug)]
pub struct Received {
    pub api_key: Option<String>,
    pub body: Value,
}

pub struct Intake {
    pub address: SocketAddr,
    pub received: mpsc::Receiver<Received>,
}

impl Intake {
    /// Starts the intake on an ephemeral port.
    pub async fn start() -> Self {
        let (sender, received) = mpsc::channel(16);

        let app = Router::new()
            .route("/api/v2/logs", post(record))
            .with_state(Arc::new(sender));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { address, received }
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/v2/logs", self.address)
    }
}

async fn record(State(sender): State<Arc<mpsc::Sender<Received>>>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    let api_key = headers
        .get("DD-API-KEY")
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    sender.send(Received { api_key, body }).await.unwrap();

    StatusCode::ACCEPTED
}
