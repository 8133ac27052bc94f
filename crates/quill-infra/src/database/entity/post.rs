//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub author_name: String,
    pub author_bio: Option<String>,
    pub author_photo: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    pub published_date: Date,
    pub thumbnail: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from a SeaORM model plus its loaded tags to the domain Post.
/// A `From` impl is ruled out by the orphan rule: the tuple and `Post` are
/// both foreign types here.
pub fn to_domain((model, tags): (Model, Vec<super::tag::Model>)) -> quill_core::domain::Post {
    quill_core::domain::Post {
        id: model.id,
        title: model.title,
        slug: model.slug,
        author_name: model.author_name,
        author_bio: model.author_bio,
        author_photo: model.author_photo,
        category: model.category,
        content: model.content,
        excerpt: model.excerpt,
        published_date: model.published_date,
        thumbnail: model.thumbnail,
        tags: tags.into_iter().map(Into::into).collect(),
    }
}

/// Conversion from the domain Post to a SeaORM ActiveModel. Tag membership
/// lives in the junction table and is persisted separately.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            author_name: Set(post.author_name),
            author_bio: Set(post.author_bio),
            author_photo: Set(post.author_photo),
            category: Set(post.category),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            published_date: Set(post.published_date),
            thumbnail: Set(post.thumbnail),
        }
    }
}
