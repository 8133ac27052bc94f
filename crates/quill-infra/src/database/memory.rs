//! In-memory post repository - used as fallback when no database is
//! configured, and as the test double for handler tests.
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostChanges, Tag};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    tags: RwLock<Vec<Tag>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic list order: newest first, slug as tiebreaker.
    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        posts
    }

    async fn resolve_tags(&self, tag_names: &[String]) -> Vec<Tag> {
        let mut registry = self.tags.write().await;
        let mut resolved: Vec<Tag> = Vec::new();

        for name in tag_names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if resolved.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
                continue;
            }

            let tag = match registry
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(name))
            {
                Some(tag) => tag.clone(),
                None => {
                    let tag = Tag::new(name);
                    registry.push(tag.clone());
                    tag
                }
            };
            resolved.push(tag);
        }

        resolved
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::sorted(posts.clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn filter_by_tag_or_category(
        &self,
        tag_ids: &[Uuid],
        category: &str,
        exclude_id: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.id != exclude_id)
            .filter(|p| {
                p.category == category || p.tags.iter().any(|t| tag_ids.contains(&t.id))
            })
            .cloned()
            .collect())
    }

    async fn find_by_tag_name(&self, name: &str) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let matching = posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        let needle = query.to_lowercase();
        let posts = self.posts.read().await;
        let matching = posts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
                    || p.excerpt.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn create(&self, mut post: Post, tag_names: &[String]) -> Result<Post, RepoError> {
        post.tags = self.resolve_tags(tag_names).await;

        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }

        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Post, RepoError> {
        // Check existence before touching the tag registry so an unknown
        // slug leaves no trace behind.
        {
            let posts = self.posts.read().await;
            if !posts.iter().any(|p| p.slug == slug) {
                return Err(RepoError::NotFound);
            }
        }

        let tags = self.resolve_tags(&changes.tags).await;

        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.slug == slug)
            .ok_or(RepoError::NotFound)?;

        // Slug and published_date stay untouched: both are immutable.
        post.title = changes.title;
        post.author_name = changes.author_name;
        post.author_bio = changes.author_bio;
        post.author_photo = changes.author_photo;
        post.category = changes.category;
        post.content = changes.content;
        post.excerpt = changes.excerpt;
        post.thumbnail = changes.thumbnail;
        post.tags = tags;

        Ok(post.clone())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.slug != slug);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
