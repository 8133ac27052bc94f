//! The content structuring pipeline.
//!
//! Everything in this module is a pure projection of a post's `content` field:
//! nothing here is persisted, and identical input always produces identical
//! output. Malformed input never fails - it degrades to partial or empty output.

mod blocks;
mod html;
mod toc;

pub use blocks::{BlockKind, ContentBlock, classify};
pub use html::render_html;
pub use toc::{HeadingLevel, TocEntry, extract_toc, heading_titles};
