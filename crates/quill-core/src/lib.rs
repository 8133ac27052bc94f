//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post/tag entities, the content structuring pipeline (block classifier,
//! table-of-contents extractor, plaintext-to-HTML renderer), slug generation,
//! and the related-post selector.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;
pub mod related;
pub mod slug;

pub use error::RepoError;
