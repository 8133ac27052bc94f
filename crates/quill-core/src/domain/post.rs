use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tag;
use crate::slug::slugify;

/// Post entity - a blog article with content, author metadata, and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Unique, human-readable key. Assigned once at creation and never regenerated,
    /// even when the title changes later.
    pub slug: String,
    pub author_name: String,
    pub author_bio: Option<String>,
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    /// Assigned at creation, immutable afterwards.
    pub published_date: NaiveDate,
    pub thumbnail: Option<String>,
    pub tags: Vec<Tag>,
}

/// Fields supplied by the caller when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    pub author_name: String,
    pub author_bio: Option<String>,
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
}

/// Mutable fields for a full-replace update. `slug` and `published_date`
/// are deliberately absent.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub author_name: String,
    pub author_bio: Option<String>,
    pub author_photo: Option<String>,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post. Assigns identity, the publication date, and - when the
    /// caller did not supply one - a slug derived from the title. Tags are attached
    /// by the repository.
    pub fn create(draft: NewPost) -> Self {
        let slug = draft
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slugify(&draft.title));

        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug,
            author_name: draft.author_name,
            author_bio: draft.author_bio,
            author_photo: draft.author_photo,
            category: draft.category,
            content: draft.content,
            excerpt: draft.excerpt,
            published_date: Utc::now().date_naive(),
            thumbnail: draft.thumbnail,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewPost {
        NewPost {
            title: "Async Rust in Practice".to_string(),
            slug: None,
            author_name: "Ada".to_string(),
            author_bio: None,
            author_photo: None,
            category: "rust".to_string(),
            content: "<p>body</p>".to_string(),
            excerpt: "body".to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn create_derives_slug_from_title() {
        let post = Post::create(draft());
        assert_eq!(post.slug, "async-rust-in-practice");
    }

    #[test]
    fn create_keeps_caller_slug() {
        let post = Post::create(NewPost {
            slug: Some("my-own-slug".to_string()),
            ..draft()
        });
        assert_eq!(post.slug, "my-own-slug");
    }

    #[test]
    fn blank_caller_slug_falls_back_to_title() {
        let post = Post::create(NewPost {
            slug: Some("   ".to_string()),
            ..draft()
        });
        assert_eq!(post.slug, "async-rust-in-practice");
    }
}
