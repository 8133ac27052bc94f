//! Domain entities - the core business objects.

mod post;

mod tag;

pub use post::{NewPost, Post, PostChanges};
pub use tag::Tag;
