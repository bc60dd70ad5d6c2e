//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;

use blog_core::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    /// JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Serialize tags into the value bound to the `tags` column.
pub fn encode_tags(tags: &[String]) -> Result<Json, RepoError> {
    serde_json::to_value(tags).map_err(|e| RepoError::Encoding(e.to_string()))
}

/// Decode a stored `tags` value.
///
/// Anything other than an array of strings (including `null`) is an error.
pub fn decode_tags(raw: Json) -> Result<Vec<String>, RepoError> {
    serde_json::from_value(raw).map_err(|e| RepoError::Encoding(e.to_string()))
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for blog_core::domain::Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags = decode_tags(model.tags).map_err(|e| {
            tracing::error!(post_id = model.id, "Stored tags are not a string array: {}", e);
            e
        })?;

        Ok(Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}
