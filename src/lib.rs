//! mythroll - Blind Mythos judgment-roll resolver
//!
//! Resolves judgment rolls with chained rerolls, the game's fixed tables,
//! and serves them over a small HTTP API.

pub mod api;
pub mod config;
pub mod dice;
pub mod judgment;
pub mod system;
pub mod tables;

use std::net::SocketAddr;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

pub use config::Settings;
pub use system::{GameSystem, Reply};

/// The mythroll server instance
pub struct Server {
    settings: Settings,
    state: api::AppState,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance
    pub fn new(settings: Settings) -> Self {
        let system = GameSystem::new(settings.judgment);
        let state = api::AppState::new(system, settings.seed);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            settings,
            state,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.settings.bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        info!("mythroll listening on {}", local_addr);

        let router = api::router(self.state.clone());
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("mythroll shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.settings.bind_addr
    }
}
