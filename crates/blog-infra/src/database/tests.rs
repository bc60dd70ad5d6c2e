use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use serde_json::json;

use blog_core::domain::NewPost;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use crate::database::entity::post;
use crate::database::postgres_repo::{PostgresPostRepository, like_pattern};

fn model(id: i32, title: &str, tags: serde_json::Value) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        category: "general".to_owned(),
        tags,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn logged_sql(repo: PostgresPostRepository) -> Vec<String> {
    repo.db
        .into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
        .collect()
}

#[tokio::test]
async fn test_get_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Test Post", json!(["x", "y"]))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.get_by_id("1").await.unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.tags, vec!["x", "y"]);
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.get_by_id("999999").await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_invalid_id_issues_no_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.get_by_id("abc").await, Err(RepoError::InvalidId(_))));
    assert!(matches!(repo.delete("").await, Err(RepoError::InvalidId(_))));
    assert!(matches!(repo.get_by_id("99999999999").await, Err(RepoError::NotFound)));
    assert!(logged_sql(repo).is_empty());
}

#[tokio::test]
async fn test_undecodable_tags_are_an_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Broken", json!({"not": "an array"}))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.list_all().await, Err(RepoError::Encoding(_))));
}

#[tokio::test]
async fn test_search_uses_like_and_json_containment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(2, "Rust tips", json!(["rust"]))]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let posts = repo.list_by_search_term("rust").await.unwrap();
    assert_eq!(posts.len(), 1);

    let sql = logged_sql(repo);
    assert_eq!(sql.len(), 1);
    assert_eq!(sql[0].matches("LIKE").count(), 3);
    assert!(sql[0].contains(r#""posts"."tags" @>"#));
    assert_eq!(sql[0].matches("ESCAPE").count(), 3);
    // The term is bound, never spliced into the statement.
    assert!(!sql[0].contains("rust"));
}

#[tokio::test]
async fn test_empty_search_term_lists_all() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "A", json!([])), model(2, "B", json!(["b"]))]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let posts = repo.list_by_search_term("").await.unwrap();
    assert_eq!(posts.len(), 2);

    let sql = logged_sql(repo);
    assert!(!sql[0].contains("WHERE"));
}

#[tokio::test]
async fn test_create_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(42, "A", json!(["x", "y"]))]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let created = repo
        .create(NewPost::new("A", "B", "C", vec!["x".into(), "y".into()]))
        .await
        .unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(created.tags, vec!["x", "y"]);

    let sql = logged_sql(repo);
    assert!(sql[0].starts_with(r#"INSERT INTO "posts""#));
    // Timestamps are left to the column defaults.
    let columns = sql[0].split("VALUES").next().unwrap_or_default();
    assert!(!columns.contains("created_at"));
    assert!(!columns.contains(r#""id""#));
}

#[tokio::test]
async fn test_update_refreshes_updated_at() {
    let mut updated = model(5, "New title", json!(["z"]));
    updated.updated_at = (Utc::now() + Duration::seconds(1)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post = repo
        .update("5", NewPost::new("New title", "B", "C", vec!["z".into()]))
        .await
        .unwrap();
    assert_eq!(post.id, 5);
    assert!(post.updated_at > post.created_at);

    let sql = logged_sql(repo);
    assert!(sql[0].starts_with(r#"UPDATE "posts""#));
    assert!(sql[0].contains(r#""updated_at" = CURRENT_TIMESTAMP"#));
    assert!(!sql[0].contains(r#""created_at" ="#));
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let result = repo.update("999999", NewPost::new("A", "B", "C", vec![])).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_twice() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    repo.delete("3").await.unwrap();
    assert!(matches!(repo.delete("3").await, Err(RepoError::NotFound)));
}

#[test]
fn test_like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("rust"), "%rust%");
    assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
    assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
}

#[tokio::test]
async fn test_query_failure_is_a_query_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("relation \"posts\" does not exist".to_owned())])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.list_all().await, Err(RepoError::Query(_))));
}
