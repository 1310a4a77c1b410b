//! # Blogposts Core
//!
//! The domain layer of the blog posts API.
//! Pure types and the store contract, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
