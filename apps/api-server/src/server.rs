//! Server lifecycle: explicit start and stop around an owned state.

use std::net::SocketAddr;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use tokio::task::JoinHandle;
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::{AppState, StartupError};

/// Grace period for in-flight requests on stop.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// A running HTTP server and the store it serves.
///
/// Nothing here is process-global, so independent servers can run side by side.
pub struct BlogServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
    state: AppState,
}

impl BlogServer {
    /// Connect the configured store and start listening.
    pub async fn start(config: &AppConfig) -> Result<Self, StartupError> {
        let state = AppState::connect(config.database.as_ref()).await?;
        match Self::start_with_state(&config.host, config.port, state.clone()) {
            Ok(server) => Ok(server),
            Err(e) => {
                state.close().await;
                Err(e)
            }
        }
    }

    /// Start listening on `host:port` around an existing state. Port 0 picks a free port.
    pub fn start_with_state(host: &str, port: u16, state: AppState) -> Result<Self, StartupError> {
        let data = web::Data::new(state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(data.clone())
                .configure(handlers::configure_routes)
        })
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind((host, port))?;

        let addr = server.addrs().into_iter().next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no address bound")
        })?;

        let server = server.run();
        let handle = server.handle();
        let task = tokio::spawn(server);

        tracing::info!(%addr, store = state.store_kind(), "Blog posts API listening");

        Ok(Self {
            addr,
            handle,
            task,
            state,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stop accepting connections, drain in-flight requests, then close the store.
    pub async fn stop(self) -> std::io::Result<()> {
        tracing::info!(addr = %self.addr, "Stopping blog posts API");
        self.handle.stop(true).await;
        self.finish().await
    }

    /// Run until the server exits on its own (e.g. on SIGINT), then close the store.
    pub async fn wait(self) -> std::io::Result<()> {
        self.finish().await
    }

    async fn finish(self) -> std::io::Result<()> {
        let result = match self.task.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e)),
        };
        self.state.close().await;
        result
    }
}
