//! Related-post selection.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::PostRepository;

/// Hard cap on related results. Not a page size.
pub const RELATED_LIMIT: usize = 4;

/// Find posts related to the post at `slug`: sharing at least one tag with it
/// or belonging to the same category, never the post itself, capped at
/// [`RELATED_LIMIT`].
///
/// A missing slug yields an empty list rather than an error - "nothing to
/// relate to" is a degraded answer here, unlike the TOC lookup where a
/// missing post is a NotFound. Results are ordered newest `published_date`
/// first, ties broken by slug, so the answer is deterministic for a given
/// store state.
pub async fn related_posts(
    repo: &dyn PostRepository,
    slug: &str,
) -> Result<Vec<Post>, RepoError> {
    let Some(post) = repo.find_by_slug(slug).await? else {
        return Ok(Vec::new());
    };

    let tag_ids: Vec<Uuid> = post.tags.iter().map(|t| t.id).collect();
    let mut candidates = repo
        .filter_by_tag_or_category(&tag_ids, &post.category, post.id)
        .await?;

    candidates.sort_by(|a, b| {
        b.published_date
            .cmp(&a.published_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
    candidates.truncate(RELATED_LIMIT);

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{NewPost, Post, PostChanges, Tag};

    /// Minimal in-process store backing the selector tests.
    struct FixtureRepo {
        posts: Vec<Post>,
    }

    #[async_trait]
    impl PostRepository for FixtureRepo {
        async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.clone())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.iter().find(|p| p.slug == slug).cloned())
        }

        async fn filter_by_tag_or_category(
            &self,
            tag_ids: &[Uuid],
            category: &str,
            exclude_id: Uuid,
        ) -> Result<Vec<Post>, RepoError> {
            Ok(self
                .posts
                .iter()
                .filter(|p| p.id != exclude_id)
                .filter(|p| {
                    p.category == category || p.tags.iter().any(|t| tag_ids.contains(&t.id))
                })
                .cloned()
                .collect())
        }

        async fn find_by_tag_name(&self, _name: &str) -> Result<Vec<Post>, RepoError> {
            unimplemented!("not used by the selector")
        }

        async fn search(&self, _query: &str) -> Result<Vec<Post>, RepoError> {
            unimplemented!("not used by the selector")
        }

        async fn create(&self, _post: Post, _tags: &[String]) -> Result<Post, RepoError> {
            unimplemented!("not used by the selector")
        }

        async fn update(&self, _slug: &str, _changes: PostChanges) -> Result<Post, RepoError> {
            unimplemented!("not used by the selector")
        }

        async fn delete_by_slug(&self, _slug: &str) -> Result<(), RepoError> {
            unimplemented!("not used by the selector")
        }
    }

    fn post(slug: &str, category: &str, tags: &[&Tag], day: u32) -> Post {
        let mut p = Post::create(NewPost {
            title: slug.to_string(),
            slug: Some(slug.to_string()),
            author_name: "Ada".to_string(),
            author_bio: None,
            author_photo: None,
            category: category.to_string(),
            content: String::new(),
            excerpt: String::new(),
            thumbnail: None,
        });
        p.published_date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        p.tags = tags.iter().map(|t| (*t).clone()).collect();
        p
    }

    #[tokio::test]
    async fn shared_tag_and_shared_category_both_qualify() {
        let rust = Tag::new("rust");
        let source = post("source", "systems", &[&rust], 1);
        let by_tag = post("by-tag", "web", &[&rust], 2);
        let by_category = post("by-category", "systems", &[], 3);
        let unrelated = post("unrelated", "cooking", &[], 4);

        let repo = FixtureRepo {
            posts: vec![source, by_tag, by_category, unrelated],
        };

        let related = related_posts(&repo, "source").await.unwrap();
        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["by-category", "by-tag"]);
    }

    #[tokio::test]
    async fn never_includes_the_source_and_caps_at_four() {
        let rust = Tag::new("rust");
        let mut posts = vec![post("source", "systems", &[&rust], 1)];
        for day in 2..=8 {
            posts.push(post(&format!("p{day}"), "systems", &[&rust], day));
        }
        let repo = FixtureRepo { posts };

        let related = related_posts(&repo, "source").await.unwrap();

        assert_eq!(related.len(), RELATED_LIMIT);
        assert!(related.iter().all(|p| p.slug != "source"));
        // Newest first.
        assert_eq!(related[0].slug, "p8");
        assert_eq!(related[3].slug, "p5");
    }

    #[tokio::test]
    async fn missing_slug_degrades_to_empty_not_error() {
        let repo = FixtureRepo { posts: Vec::new() };
        let related = related_posts(&repo, "no-such-post").await.unwrap();
        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn ties_on_date_break_by_slug() {
        let tag = Tag::new("shared");
        let repo = FixtureRepo {
            posts: vec![
                post("source", "a", &[&tag], 1),
                post("zeta", "b", &[&tag], 5),
                post("alpha", "b", &[&tag], 5),
            ],
        };

        let related = related_posts(&repo, "source").await.unwrap();
        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zeta"]);
    }
}
