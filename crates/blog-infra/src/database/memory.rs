//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostId, parse_post_id};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    posts: BTreeMap<PostId, Post>,
    last_id: PostId,
}

/// In-memory post storage keyed by id.
///
/// Ids are assigned from a counter and never reused after a delete.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().cloned().collect())
    }

    async fn list_by_search_term(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .values()
            .filter(|post| post.matches_term(term))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Post, RepoError> {
        let id = parse_post_id(id)?;
        let store = self.store.read().await;
        store.posts.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Query("post id sequence exhausted".to_string()))?;
        store.last_id = id;

        let post = Post::from_new(id, post, Utc::now());
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: &str, post: NewPost) -> Result<Post, RepoError> {
        let id = parse_post_id(id)?;
        let mut store = self.store.write().await;
        let existing = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        existing.apply(post, Utc::now());
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let id = parse_post_id(id)?;
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
