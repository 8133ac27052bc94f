//! Blog post handlers: list, detail, search, related, TOC, structured view,
//! and the write path.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::content::{classify, extract_toc, heading_titles, render_html};
use quill_core::domain::{NewPost, Post, PostChanges, Tag};
use quill_core::error::RepoError;
use quill_core::related::related_posts;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    BlockDto, CreatePostRequest, PostDetail, PostSummary, StructuredPost, TagDto, TocEntryDto,
    TocResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs - all posts, newest first.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    Ok(HttpResponse::Ok().json(summaries(&posts)))
}

/// GET /api/blogs/{slug} - full post, 404 when the slug is unknown.
pub async fn detail(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = require_post(&state, &slug).await?;
    Ok(HttpResponse::Ok().json(to_detail(&post)))
}

/// GET /api/blogs/{slug}/related - up to four related posts.
///
/// An unknown slug degrades to an empty list instead of a 404; "nothing to
/// relate to" is a valid answer on this path.
pub async fn related(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let posts = related_posts(state.posts.as_ref(), &slug).await?;
    Ok(HttpResponse::Ok().json(summaries(&posts)))
}

/// GET /api/blogs/{slug}/toc - extracted h2/h3 headings, 404 when the slug
/// is unknown (unlike the related path).
pub async fn toc(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = require_post(&state, &slug).await?;

    let toc = extract_toc(&post.content)
        .into_iter()
        .map(|entry| TocEntryDto {
            level: entry.level.as_str().to_string(),
            text: entry.text,
        })
        .collect();

    Ok(HttpResponse::Ok().json(TocResponse { toc }))
}

/// GET /api/blogs/{slug}/structured - classified content blocks.
pub async fn structured(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = require_post(&state, &slug).await?;
    Ok(HttpResponse::Ok().json(to_structured(&post)))
}

/// GET /api/blogs/tag/{tag} - posts carrying the tag, case-insensitive.
pub async fn by_tag(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let tag = path.into_inner();
    let posts = state.posts.find_by_tag_name(&tag).await?;
    Ok(HttpResponse::Ok().json(summaries(&posts)))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/blogs/search?q= - substring search over title/content/excerpt.
/// An absent or empty query returns the full listing.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let posts = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.posts.search(q).await?,
        _ => state.posts.list_all().await?,
    };
    Ok(HttpResponse::Ok().json(summaries(&posts)))
}

/// POST /api/blogs - create a post. Content is normalized to HTML before
/// storage; the slug is derived from the title when absent.
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_fields(&[
        ("title", &req.title),
        ("author_name", &req.author_name),
        ("category", &req.category),
        ("content", &req.content),
        ("excerpt", &req.excerpt),
    ])?;

    let post = Post::create(NewPost {
        title: req.title,
        slug: req.slug,
        author_name: req.author_name,
        author_bio: req.author_bio,
        author_photo: req.author_photo,
        category: req.category,
        content: render_html(&req.content),
        excerpt: req.excerpt,
        thumbnail: req.thumbnail,
    });

    if post.slug.is_empty() {
        return Err(AppError::BadRequest(
            "title does not produce a usable slug".to_string(),
        ));
    }

    let created = state.posts.create(post, &req.tags).await?;

    tracing::info!(post_slug = %created.slug, "Post created");
    Ok(HttpResponse::Created().json(to_detail(&created)))
}

/// PUT /api/blogs/{slug} - replace the mutable fields. The slug and the
/// publication date never change.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let req = body.into_inner();
    validate_fields(&[
        ("title", &req.title),
        ("author_name", &req.author_name),
        ("category", &req.category),
        ("content", &req.content),
        ("excerpt", &req.excerpt),
    ])?;

    let changes = PostChanges {
        title: req.title,
        author_name: req.author_name,
        author_bio: req.author_bio,
        author_photo: req.author_photo,
        category: req.category,
        content: render_html(&req.content),
        excerpt: req.excerpt,
        thumbnail: req.thumbnail,
        tags: req.tags,
    };

    let updated = state
        .posts
        .update(&slug, changes)
        .await
        .map_err(|e| not_found_or(e, &slug))?;

    Ok(HttpResponse::Ok().json(to_detail(&updated)))
}

/// DELETE /api/blogs/{slug}
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    state
        .posts
        .delete_by_slug(&slug)
        .await
        .map_err(|e| not_found_or(e, &slug))?;

    tracing::info!(post_slug = %slug, "Post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted")))
}

async fn require_post(state: &AppState, slug: &str) -> Result<Post, AppError> {
    state
        .posts
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with slug '{slug}' not found")))
}

fn not_found_or(err: RepoError, slug: &str) -> AppError {
    match err {
        RepoError::NotFound => AppError::NotFound(format!("Post with slug '{slug}' not found")),
        other => other.into(),
    }
}

fn validate_fields(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let errors: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{name} must not be empty"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn tag_dtos(tags: &[Tag]) -> Vec<TagDto> {
    tags.iter()
        .map(|tag| TagDto {
            id: tag.id.to_string(),
            name: tag.name.clone(),
        })
        .collect()
}

fn summaries(posts: &[Post]) -> Vec<PostSummary> {
    posts.iter().map(to_summary).collect()
}

fn to_summary(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id.to_string(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        category: post.category.clone(),
        published_date: post.published_date.to_string(),
        thumbnail: post.thumbnail.clone(),
        tags: tag_dtos(&post.tags),
    }
}

fn to_detail(post: &Post) -> PostDetail {
    PostDetail {
        id: post.id.to_string(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        author_name: post.author_name.clone(),
        author_bio: post.author_bio.clone(),
        author_photo: post.author_photo.clone(),
        category: post.category.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        published_date: post.published_date.to_string(),
        thumbnail: post.thumbnail.clone(),
        tags: tag_dtos(&post.tags),
        headings: heading_titles(&post.content),
    }
}

fn to_structured(post: &Post) -> StructuredPost {
    let blocks = classify(&post.content)
        .into_iter()
        .map(|block| BlockDto {
            kind: block.kind.as_str().to_string(),
            text: block.text,
        })
        .collect();

    StructuredPost {
        id: post.id.to_string(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        blocks,
        published_date: post.published_date.to_string(),
        author_name: post.author_name.clone(),
        author_bio: post.author_bio.clone(),
        thumbnail: post.thumbnail.clone(),
        tags: tag_dtos(&post.tags),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};

    use quill_core::domain::{NewPost, Post};
    use quill_core::ports::PostRepository;
    use quill_infra::database::InMemoryPostRepository;
    use quill_shared::dto::{PostDetail, PostSummary, StructuredPost, TocResponse};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn draft(title: &str, category: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            slug: None,
            author_name: "Ada".to_string(),
            author_bio: None,
            author_photo: None,
            category: category.to_string(),
            content: content.to_string(),
            excerpt: "excerpt".to_string(),
            thumbnail: None,
        }
    }

    async fn state_with_posts() -> AppState {
        let repo = Arc::new(InMemoryPostRepository::new());

        repo.create(
            Post::create(draft(
                "Rust Intro",
                "systems",
                "<h2>Setup</h2>\n<h3>Cargo</h3>\n<p>body</p>",
            )),
            &["rust".to_string()],
        )
        .await
        .unwrap();

        repo.create(
            Post::create(draft("Also Rust", "web", "<p>more</p>")),
            &["rust".to_string()],
        )
        .await
        .unwrap();

        repo.create(
            Post::create(draft("Totally Unrelated", "cooking", "<p>soup</p>")),
            &[],
        )
        .await
        .unwrap();

        AppState {
            posts: repo,
            chat: None,
        }
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn toc_missing_slug_is_404_but_related_is_empty_200() {
        let app = app!(state_with_posts().await);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/blogs/nope/toc").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        let related: Vec<PostSummary> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/nope/related")
                .to_request(),
        )
        .await;
        assert!(related.is_empty());
    }

    #[actix_web::test]
    async fn toc_lists_h2_and_h3_in_order() {
        let app = app!(state_with_posts().await);

        let body: TocResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/rust-intro/toc")
                .to_request(),
        )
        .await;

        let levels: Vec<&str> = body.toc.iter().map(|e| e.level.as_str()).collect();
        let texts: Vec<&str> = body.toc.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(levels, vec!["h2", "h3"]);
        assert_eq!(texts, vec!["Setup", "Cargo"]);
    }

    #[actix_web::test]
    async fn detail_includes_h2_headings() {
        let app = app!(state_with_posts().await);

        let body: PostDetail = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/rust-intro")
                .to_request(),
        )
        .await;

        assert_eq!(body.slug, "rust-intro");
        assert_eq!(body.headings, vec!["Setup".to_string()]);
        assert_eq!(body.tags.len(), 1);
    }

    #[actix_web::test]
    async fn related_shares_tag_but_skips_unrelated() {
        let app = app!(state_with_posts().await);

        let related: Vec<PostSummary> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/rust-intro/related")
                .to_request(),
        )
        .await;

        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert!(slugs.contains(&"also-rust"));
        assert!(!slugs.contains(&"rust-intro"));
        assert!(!slugs.contains(&"totally-unrelated"));
    }

    #[actix_web::test]
    async fn structured_view_classifies_blocks() {
        let state = state_with_posts().await;
        let repo = state.posts.clone();
        repo.create(
            Post::create(draft(
                "Plain Notes",
                "misc",
                "📘 Intro\nHello World\nplain body text.",
            )),
            &[],
        )
        .await
        .unwrap();

        let app = app!(state);

        let body: StructuredPost = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/plain-notes/structured")
                .to_request(),
        )
        .await;

        let kinds: Vec<&str> = body.blocks.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(kinds, vec!["heading", "subheading", "paragraph"]);
        assert_eq!(body.blocks[0].text, "Intro");
    }

    #[actix_web::test]
    async fn tag_search_is_case_insensitive() {
        let app = app!(state_with_posts().await);

        let posts: Vec<PostSummary> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/tag/RUST")
                .to_request(),
        )
        .await;
        assert_eq!(posts.len(), 2);
    }

    #[actix_web::test]
    async fn free_text_search_and_fallback_listing() {
        let app = app!(state_with_posts().await);

        let hits: Vec<PostSummary> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/search?q=soup")
                .to_request(),
        )
        .await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "totally-unrelated");

        let all: Vec<PostSummary> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/blogs/search").to_request(),
        )
        .await;
        assert_eq!(all.len(), 3);
    }

    #[actix_web::test]
    async fn create_normalizes_content_and_derives_slug() {
        let app = app!(state_with_posts().await);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/blogs")
                .set_json(serde_json::json!({
                    "title": "Fresh Post",
                    "author_name": "Ada",
                    "category": "rust",
                    "content": "📘 Overview\nplain body.",
                    "excerpt": "short",
                    "tags": ["Rust", "tooling"]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let body: PostDetail = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/fresh-post")
                .to_request(),
        )
        .await;
        assert_eq!(body.content, "<h2>Overview</h2>\n<p>plain body.</p>");
        assert_eq!(body.headings, vec!["Overview".to_string()]);
        assert_eq!(body.tags.len(), 2);
    }

    #[actix_web::test]
    async fn create_with_blank_fields_is_unprocessable() {
        let app = app!(state_with_posts().await);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/blogs")
                .set_json(serde_json::json!({
                    "title": "  ",
                    "author_name": "Ada",
                    "category": "rust",
                    "content": "body",
                    "excerpt": ""
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 422);
    }

    #[actix_web::test]
    async fn duplicate_slug_conflicts() {
        let app = app!(state_with_posts().await);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/blogs")
                .set_json(serde_json::json!({
                    "title": "Rust Intro",
                    "author_name": "Ada",
                    "category": "rust",
                    "content": "body",
                    "excerpt": "x"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn update_keeps_slug_and_delete_then_404() {
        let app = app!(state_with_posts().await);

        let body: PostDetail = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri("/api/blogs/rust-intro")
                .set_json(serde_json::json!({
                    "title": "Rust Intro Revised",
                    "author_name": "Ada",
                    "category": "systems",
                    "content": "updated body.",
                    "excerpt": "new excerpt"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(body.slug, "rust-intro");
        assert_eq!(body.title, "Rust Intro Revised");

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/blogs/rust-intro")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/blogs/rust-intro")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }
}
