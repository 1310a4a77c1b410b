//! # Blogposts Infrastructure
//!
//! Concrete implementations of the store port defined in `blogpost-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - In-memory store only

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogPostRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresBlogPostRepository, StoreConnection};
