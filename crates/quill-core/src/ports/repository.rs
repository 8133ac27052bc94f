use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges};
use crate::error::RepoError;

/// Post repository - the single persistence port of the blog core.
///
/// All queries are explicit, typed calls; there is no runtime field
/// introspection and no hidden connection state.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `published_date` first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Look up one post by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Candidates for the related-post selector: posts carrying at least one
    /// of `tag_ids` OR matching `category`, excluding `exclude_id`, each
    /// candidate at most once. Ordering is left to the caller.
    async fn filter_by_tag_or_category(
        &self,
        tag_ids: &[Uuid],
        category: &str,
        exclude_id: Uuid,
    ) -> Result<Vec<Post>, RepoError>;

    /// Posts carrying a tag whose name matches case-insensitively.
    async fn find_by_tag_name(&self, name: &str) -> Result<Vec<Post>, RepoError>;

    /// Case-insensitive substring search over title, content, and excerpt.
    async fn search(&self, query: &str) -> Result<Vec<Post>, RepoError>;

    /// Persist a freshly created post and attach the named tags, creating
    /// tags that do not exist yet.
    async fn create(&self, post: Post, tag_names: &[String]) -> Result<Post, RepoError>;

    /// Full-replace update of the mutable fields. The slug and publication
    /// date never change. Fails with [`RepoError::NotFound`] if absent.
    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete by slug. Fails with [`RepoError::NotFound`] if absent.
    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError>;
}
