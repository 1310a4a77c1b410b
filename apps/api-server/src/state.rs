//! Application state - shared across all handlers.

use std::sync::Arc;

use blogpost_core::ports::BlogPostRepository;
use blogpost_infra::{DatabaseConfig, InMemoryBlogPostRepository};

#[cfg(feature = "postgres")]
use blogpost_infra::{PostgresBlogPostRepository, StoreConnection};

/// Failures that stop the server from coming up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to connect to the blog post store: {0}")]
    Store(String),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn BlogPostRepository>,
    #[cfg(feature = "postgres")]
    store: Option<StoreConnection>,
}

impl AppState {
    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryBlogPostRepository::new()))
    }

    /// State over any repository. No connection is owned, so `close` is a no-op.
    pub fn with_repository(posts: Arc<dyn BlogPostRepository>) -> Self {
        Self {
            posts,
            #[cfg(feature = "postgres")]
            store: None,
        }
    }

    /// Build the state for a configuration.
    ///
    /// A configured database that cannot be reached is a startup failure.
    pub async fn connect(db_config: Option<&DatabaseConfig>) -> Result<Self, StartupError> {
        let Some(config) = db_config else {
            tracing::warn!("No database URL set. Running over the in-memory store.");
            return Ok(Self::in_memory());
        };

        Self::open_store(config).await
    }

    #[cfg(feature = "postgres")]
    async fn open_store(config: &DatabaseConfig) -> Result<Self, StartupError> {
        let store = StoreConnection::init(config)
            .await
            .map_err(|e| StartupError::Store(e.to_string()))?;
        let posts = Arc::new(PostgresBlogPostRepository::new(store.conn()));
        tracing::info!("Application state initialized over PostgreSQL");
        Ok(Self {
            posts,
            store: Some(store),
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn open_store(_config: &DatabaseConfig) -> Result<Self, StartupError> {
        tracing::warn!("Built without the postgres feature - ignoring database URL");
        Ok(Self::in_memory())
    }

    /// Name of the backing store, for health reporting.
    pub fn store_kind(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        {
            if self.store.is_some() {
                return "postgres";
            }
        }
        "memory"
    }

    /// Whether the backing store answers.
    pub async fn store_reachable(&self) -> bool {
        #[cfg(feature = "postgres")]
        {
            if let Some(store) = &self.store {
                if let Err(e) = store.ping().await {
                    tracing::warn!(error = %e, "Store ping failed");
                    return false;
                }
            }
        }
        true
    }

    /// Release the store connection, if this state owns one.
    pub async fn close(&self) {
        #[cfg(feature = "postgres")]
        {
            if let Some(store) = &self.store {
                if let Err(e) = store.close().await {
                    tracing::error!(error = %e, "Failed to close store connection");
                }
            }
        }
    }
}
