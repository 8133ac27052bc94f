//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Tag as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDto {
    pub id: String,
    pub name: String,
}

/// Post card for list, search, and related views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub category: String,
    pub published_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub tags: Vec<TagDto>,
}

/// Full post for the detail view, including the extracted `<h2>` headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub published_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub tags: Vec<TagDto>,
    pub headings: Vec<String>,
}

/// One classified content block in the structured view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Structured view of a post: classified blocks plus display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub blocks: Vec<BlockDto>,
    pub published_date: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub tags: Vec<TagDto>,
}

/// One table-of-contents entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntryDto {
    pub level: String,
    pub text: String,
}

/// Response of the TOC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocResponse {
    pub toc: Vec<TocEntryDto>,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    /// Derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub author_name: String,
    #[serde(default)]
    pub author_bio: Option<String>,
    #[serde(default)]
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to replace a post's mutable fields. The slug and the publication
/// date are immutable and therefore absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub author_name: String,
    #[serde(default)]
    pub author_bio: Option<String>,
    #[serde(default)]
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Chat proxy request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat proxy reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
