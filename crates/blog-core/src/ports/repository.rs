use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the only seam through which posts are read or written.
///
/// Ids are taken as the raw strings received from callers and parsed with
/// [`crate::domain::parse_post_id`] before any statement is issued.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in primary-key order.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title, content or category contains `term`, or whose tags
    /// include `term` as an element. An empty term lists everything.
    ///
    /// The term is matched literally: `%` and `_` are not wildcards.
    async fn list_by_search_term(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    async fn get_by_id(&self, id: &str) -> Result<Post, RepoError>;

    /// Insert a post. Storage assigns the id and both timestamps.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite the writable fields and refresh `updated_at`.
    async fn update(&self, id: &str, post: NewPost) -> Result<Post, RepoError>;

    async fn delete(&self, id: &str) -> Result<(), RepoError>;

    /// Short name of the backing store, reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
