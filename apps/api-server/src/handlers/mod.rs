//! HTTP handlers and route configuration.

mod health;
mod posts;


use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppError, AppResult, json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/health", web::get().to(health::health_check))
    // Collection
    .service(
        web::resource("/posts")
            .route(web::get().to(posts::list_posts))
            .route(web::post().to(posts::create_post))
            .default_service(web::route().to(posts::collection_method_not_allowed)),
    )
    // A trailing slash means the id segment is missing
    .service(web::resource("/posts/").to(posts::missing_id))
    // Single post
    .service(
        web::resource("/posts/{id}")
            .route(web::get().to(posts::get_post))
            .route(web::put().to(posts::update_post))
            .route(web::delete().to(posts::delete_post))
            .default_service(web::route().to(posts::item_method_not_allowed)),
    )
    .default_service(web::route().to(not_found));
}

async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Route not found".to_string()))
}
