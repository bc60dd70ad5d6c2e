//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use blog_core::domain::{NewPost, Post, parse_post_id};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity, encode_tags};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn storage_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// `%term%` with the term's own `%`, `_` and `\` escaped, so it only ever
/// matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_literally(pattern: &str) -> LikeExpr {
    LikeExpr::new(pattern).escape('\\')
}

fn into_posts(models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
    models.into_iter().map(Post::try_from).collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        into_posts(models)
    }

    async fn list_by_search_term(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        if term.is_empty() {
            return self.list_all().await;
        }
        tracing::debug!(term = %term, "Searching posts");

        // `@>` on a one-element array matches the term as a whole tag only.
        let tag_needle = encode_tags(&[term.to_string()])?;
        let pattern = like_pattern(term);
        let condition = Condition::any()
            .add(post::Column::Title.like(contains_literally(&pattern)))
            .add(post::Column::Content.like(contains_literally(&pattern)))
            .add(post::Column::Category.like(contains_literally(&pattern)))
            .add(Expr::cust_with_values(
                r#""posts"."tags" @> $1"#,
                [tag_needle],
            ));

        let models = PostEntity::find()
            .filter(condition)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        into_posts(models)
    }

    async fn get_by_id(&self, id: &str) -> Result<Post, RepoError> {
        let id = parse_post_id(id)?;

        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or(RepoError::NotFound)?;

        Post::try_from(model)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let tags = encode_tags(&post.tags)?;

        // id and timestamps are left unset so the column defaults apply.
        let active_model = post::ActiveModel {
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(tags),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await.map_err(storage_error)?;
        tracing::debug!(post_id = model.id, "Post created");

        Post::try_from(model)
    }

    async fn update(&self, id: &str, post: NewPost) -> Result<Post, RepoError> {
        let id = parse_post_id(id)?;
        let tags = encode_tags(&post.tags)?;

        let mut updated = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(post.title))
            .col_expr(post::Column::Content, Expr::value(post.content))
            .col_expr(post::Column::Category, Expr::value(post.category))
            .col_expr(post::Column::Tags, Expr::value(tags))
            .col_expr(post::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(storage_error)?;

        let model = updated.pop().ok_or(RepoError::NotFound)?;
        tracing::debug!(post_id = model.id, "Post updated");

        Post::try_from(model)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let id = parse_post_id(id)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!(post_id = id, "Post deleted");

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
