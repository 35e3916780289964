use reqwest::{Client as ReqwestClient, Response};
use swarm_tracker_primitives::info_hash::InfoHash;

use super::requests::Query;

/// HTTP Tracker Client
pub struct Client {
    server_addr: std::net::SocketAddr,
    reqwest_client: ReqwestClient,
    path_key: Option<String>,
}

/// URL components in this context:
///
/// ```text
/// http://127.0.0.1:62304/YZ....rJ/announce?info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0
/// \_____________________/\_______________/ \_______________________________________________________________/
///            |                   |                                    |
///         base url              path                                query
/// ```
impl Client {
    pub fn new(server_addr: std::net::SocketAddr) -> Self {
        Self {
            server_addr,
            reqwest_client: reqwest::Client::builder().build().unwrap(),
            path_key: None,
        }
    }

    /// Creates a client for a tracker that is only served under `/<path_key>/`.
    pub fn with_path_key(server_addr: std::net::SocketAddr, path_key: &str) -> Self {
        Self {
            server_addr,
            reqwest_client: reqwest::Client::builder().build().unwrap(),
            path_key: Some(path_key.to_string()),
        }
    }

    pub async fn announce(&self, query: &Query) -> Response {
        self.get(&self.build_announce_path_and_query(query)).await
    }

    pub async fn announce_with_header(&self, query: &Query, key: &str, value: &str) -> Response {
        self.get_with_header(&self.build_announce_path_and_query(query), key, value)
            .await
    }

    pub async fn swarm(&self, info_hash: &InfoHash) -> Response {
        self.get(&self.build_path(&info_hash.to_hex_string())).await
    }

    pub async fn get(&self, path: &str) -> Response {
        self.reqwest_client.get(self.build_url(path)).send().await.unwrap()
    }

    pub async fn get_with_header(&self, path: &str, key: &str, value: &str) -> Response {
        self.reqwest_client
            .get(self.build_url(path))
            .header(key, value)
            .send()
            .await
            .unwrap()
    }

    fn build_announce_path_and_query(&self, query: &Query) -> String {
        format!("{}?{query}", self.build_path("announce"))
    }

    fn build_path(&self, path: &str) -> String {
        match &self.path_key {
            Some(key) => format!("{key}/{path}"),
            None => path.to_string(),
        }
    }

    fn build_url(&self, path: &str) -> String {
        let base_url = self.base_url();
        format!("{base_url}{path}")
    }

    fn base_url(&self) -> String {
        format!("http://{}/", &self.server_addr)
    }
}
