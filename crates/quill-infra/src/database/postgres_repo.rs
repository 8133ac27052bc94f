//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, EntityTrait,
    IntoActiveModel, JoinType, LoaderTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::{Post, PostChanges, Tag};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::{post, post_tag, tag};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Load the tag sets for a batch of post rows and lift them into the
    /// domain, preserving row order.
    async fn with_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        let tags = models
            .load_many_to_many(tag::Entity, post_tag::Entity, &self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().zip(tags).map(post::to_domain).collect())
    }
}

fn map_db_err(e: sea_orm::DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint("entity with the same unique key already exists".to_string())
    } else {
        RepoError::Query(msg)
    }
}

/// Build a `%query%` LIKE pattern with the LIKE metacharacters (`\`, `%`,
/// `_`) escaped so user input always matches as a literal substring.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Case-insensitive tag-name lookup condition: `lower(name) = lower(input)`.
fn tag_name_eq(name: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col((tag::Entity, tag::Column::Name)))).eq(name.to_lowercase())
}

/// Find-or-create each named tag and attach it to the post. Duplicate and
/// blank names in the input are skipped.
async fn attach_tags<C: ConnectionTrait>(
    conn: &C,
    post_id: Uuid,
    tag_names: &[String],
) -> Result<Vec<Tag>, RepoError> {
    let mut tags: Vec<Tag> = Vec::new();

    for name in tag_names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if tags.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            continue;
        }

        let existing = tag::Entity::find()
            .filter(tag_name_eq(name))
            .one(conn)
            .await
            .map_err(map_db_err)?;

        let model = match existing {
            Some(model) => model,
            None => {
                tag::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(name.to_string()),
                }
                .insert(conn)
                .await
                .map_err(map_db_err)?
            }
        };

        post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(model.id),
        }
        .insert(conn)
        .await
        .map_err(map_db_err)?;

        tags.push(model.into());
    }

    Ok(tags)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = post::Entity::find()
            .order_by_desc(post::Column::PublishedDate)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        self.with_tags(models).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_slug = %slug, "Finding post by slug");

        let model = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let posts = self.with_tags(vec![model]).await?;
        Ok(posts.into_iter().next())
    }

    async fn filter_by_tag_or_category(
        &self,
        tag_ids: &[Uuid],
        category: &str,
        exclude_id: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let mut matches = Condition::any().add(post::Column::Category.eq(category));

        if !tag_ids.is_empty() {
            let tagged_posts = Query::select()
                .column(post_tag::Column::PostId)
                .from(post_tag::Entity)
                .and_where(Expr::col(post_tag::Column::TagId).is_in(tag_ids.iter().copied()))
                .to_owned();
            matches = matches.add(post::Column::Id.in_subquery(tagged_posts));
        }

        let models = post::Entity::find()
            .filter(matches)
            .filter(post::Column::Id.ne(exclude_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        self.with_tags(models).await
    }

    async fn find_by_tag_name(&self, name: &str) -> Result<Vec<Post>, RepoError> {
        let models = post::Entity::find()
            .join(JoinType::InnerJoin, post::Relation::PostTag.def())
            .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(tag_name_eq(name))
            .order_by_desc(post::Column::PublishedDate)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        self.with_tags(models).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = like_pattern(query);
        let matches = |col: post::Column| {
            Expr::col((post::Entity, col)).ilike(LikeExpr::new(pattern.as_str()).escape('\\'))
        };

        let models = post::Entity::find()
            .filter(
                Condition::any()
                    .add(matches(post::Column::Title))
                    .add(matches(post::Column::Content))
                    .add(matches(post::Column::Excerpt)),
            )
            .order_by_desc(post::Column::PublishedDate)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        self.with_tags(models).await
    }

    async fn create(&self, post: Post, tag_names: &[String]) -> Result<Post, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let mut created = post.clone();
        let active: post::ActiveModel = post.into();
        active.insert(&txn).await.map_err(map_db_err)?;

        created.tags = attach_tags(&txn, created.id, tag_names).await?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(created)
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Post, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let model = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let post_id = model.id;

        // Slug and published_date stay untouched: both are immutable.
        let mut active = model.into_active_model();
        active.title = Set(changes.title);
        active.author_name = Set(changes.author_name);
        active.author_bio = Set(changes.author_bio);
        active.author_photo = Set(changes.author_photo);
        active.category = Set(changes.category);
        active.content = Set(changes.content);
        active.excerpt = Set(changes.excerpt);
        active.thumbnail = Set(changes.thumbnail);

        let updated = active.update(&txn).await.map_err(map_db_err)?;

        // Replace tag membership wholesale.
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let tags = attach_tags(&txn, post_id, &changes.tags).await?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let mut updated = post::to_domain((updated, Vec::<tag::Model>::new()));
        updated.tags = tags;
        Ok(updated)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError> {
        let result = post::Entity::delete_many()
            .filter(post::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
