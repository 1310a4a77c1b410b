//! # Blog Posts API
//!
//! Actix-web server exposing CRUD over blog posts.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::BlogServer;
pub use state::{AppState, StartupError};
