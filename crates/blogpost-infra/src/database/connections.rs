#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the document store connection.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
        }
    }
}

/// Shared handle to the PostgreSQL pool.
///
/// Clones share the pool; `close` releases it for every clone.
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct StoreConnection {
    conn: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl StoreConnection {
    /// Connect and bring the schema up to date.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Connecting to blog post store...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Blog post store connected");

        Migrator::up(&conn, None).await?;
        tracing::info!("Schema migrations applied");

        Ok(Self::from_conn(conn))
    }

    fn from_conn(conn: DbConn) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    pub fn conn(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    /// Release the pool. Further queries through any clone fail.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.conn.close_by_ref().await?;
        tracing::info!("Blog post store connection closed");
        Ok(())
    }
}
