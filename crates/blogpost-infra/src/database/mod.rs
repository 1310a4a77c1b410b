//! Blog post stores and connection management.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryBlogPostRepository;

#[cfg(feature = "postgres")]
pub use connections::StoreConnection;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresBlogPostRepository;
