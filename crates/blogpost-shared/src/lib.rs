//! # Blogposts Shared
//!
//! Wire types exchanged with API clients.
//! Kept free of server dependencies so a client crate can reuse them.

pub mod dto;
pub mod response;

pub use dto::{AuthorRequest, BlogPostView, CreatePostRequest, UpdatePostRequest};
pub use response::ErrorResponse;
