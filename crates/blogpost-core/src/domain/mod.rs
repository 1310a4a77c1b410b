//! Domain entities - the core business objects.

mod post;

pub use post::{Author, BlogPost, BlogPostPatch, truncate_to_millis};
