//! Post handlers - the `/posts` collection and `/posts/{id}` resources.

use actix_web::{HttpResponse, web};

use blog_core::domain::NewPost;
use blog_shared::dto::{PostRequest, SearchQuery};
use blog_shared::MessageResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Methods served by `/posts`.
pub const COLLECTION_METHODS: &str = "GET, POST";
/// Methods served by `/posts/{id}`.
pub const ITEM_METHODS: &str = "GET, PUT, DELETE";

fn into_new_post(req: PostRequest) -> NewPost {
    NewPost::new(req.title, req.content, req.category, req.tags)
}

/// Reject blank ids before any storage access.
fn require_id(path: web::Path<String>) -> AppResult<String> {
    let id = path.into_inner();
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("Invalid or missing id".to_string()));
    }
    Ok(id)
}

/// GET /posts and GET /posts?term=...
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = match query.term() {
        Some(term) => state.posts.list_by_search_term(term).await?,
        None => state.posts.list_all().await?,
    };

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(into_new_post(body.into_inner())).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = require_id(path)?;
    let post = state.posts.get_by_id(&id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = require_id(path)?;
    let post = state
        .posts
        .update(&id, into_new_post(body.into_inner()))
        .await?;
    tracing::info!(post_id = post.id, "Post updated");

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = require_id(path)?;
    state.posts.delete(&id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "The post is deleted successfully",
    )))
}

/// Any method on /posts/
pub async fn missing_id() -> AppResult<HttpResponse> {
    Err(AppError::BadRequest("Invalid or missing id".to_string()))
}

pub async fn collection_method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed {
        allow: COLLECTION_METHODS,
    })
}

pub async fn item_method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed {
        allow: ITEM_METHODS,
    })
}
