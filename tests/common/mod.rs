//! Common test utilities - MythrollTest harness for end-to-end testing

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mythroll::{Server, Settings};
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test harness that spawns a real mythroll server on a random port
pub struct MythrollTest {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl MythrollTest {
    /// Start a server with default settings
    pub async fn start() -> Result<Self> {
        Self::start_with(Settings::default()).await
    }

    /// Start a server with the given settings (the bind address is ignored)
    pub async fn start_with(settings: Settings) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = Arc::new(Server::new(settings));
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.serve(listener).await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Roll a command and return the JSON body
    pub async fn roll(
        &self,
        command: &str,
        seed: Option<u64>,
    ) -> Result<(u16, serde_json::Value)> {
        let resp = self
            .post("/roll", &serde_json::json!({ "command": command, "seed": seed }))
            .await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }

    /// Shutdown the server gracefully
    pub fn shutdown(&self) {
        self.server.shutdown();
    }
}

impl Drop for MythrollTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
