use std::num::IntErrorKind;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RepoError;

/// Primary key type of the `posts` table.
pub type PostId = i32;

/// Post entity - a blog-style record with a category and free-form tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable part of a post, used for both create and update.
///
/// The id and both timestamps are always assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            tags,
        }
    }
}

impl Post {
    /// Materialize a stored post from its writable fields.
    pub fn from_new(id: PostId, post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: post.title,
            content: post.content,
            category: post.category,
            tags: post.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the writable fields and refresh `updated_at`.
    ///
    /// `updated_at` always advances, even if `now` is not past the previous value.
    pub fn apply(&mut self, post: NewPost, now: DateTime<Utc>) {
        self.title = post.title;
        self.content = post.content;
        self.category = post.category;
        self.tags = post.tags;
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Check whether `term` is a substring of title, content or category,
    /// or exactly one of the tags.
    pub fn matches_term(&self, term: &str) -> bool {
        self.title.contains(term)
            || self.content.contains(term)
            || self.category.contains(term)
            || self.tags.iter().any(|tag| tag == term)
    }
}

/// Parse an id received as an opaque path segment.
///
/// A numeric id outside the key range can never be stored, so it is reported
/// as `NotFound` rather than `InvalidId`.
pub fn parse_post_id(raw: &str) -> Result<PostId, RepoError> {
    if raw.is_empty() {
        return Err(RepoError::InvalidId("id must not be empty".to_string()));
    }
    raw.parse::<PostId>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RepoError::NotFound,
        _ => RepoError::InvalidId(format!("'{}' is not a numeric id", raw)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPost {
        NewPost::new(
            "Rust ownership",
            "Borrowing explained",
            "programming",
            vec!["rust".to_string(), "memory".to_string()],
        )
    }

    #[test]
    fn test_parse_post_id() {
        assert_eq!(parse_post_id("42").unwrap(), 42);
        assert!(matches!(parse_post_id(""), Err(RepoError::InvalidId(_))));
        assert!(matches!(parse_post_id("abc"), Err(RepoError::InvalidId(_))));
        assert!(matches!(parse_post_id("4 2"), Err(RepoError::InvalidId(_))));
    }

    #[test]
    fn test_out_of_range_id_is_not_found() {
        assert!(matches!(parse_post_id("99999999999"), Err(RepoError::NotFound)));
        assert!(matches!(parse_post_id("-99999999999"), Err(RepoError::NotFound)));
        assert_eq!(parse_post_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn test_matches_term() {
        let post = Post::from_new(1, sample(), Utc::now());
        assert!(post.matches_term("owner"));
        assert!(post.matches_term("Borrow"));
        assert!(post.matches_term("gram"));
        assert!(post.matches_term("memory"));
        // Tags only match as whole elements.
        assert!(!post.matches_term("mem"));
        assert!(!post.matches_term("python"));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let created = Utc::now();
        let mut post = Post::from_new(7, sample(), created);
        let later = created + Duration::seconds(5);

        post.apply(NewPost::new("t", "c", "k", vec![]), later);

        assert_eq!(post.id, 7);
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, later);
        assert_eq!(post.title, "t");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_apply_advances_updated_at_on_same_instant() {
        let now = Utc::now();
        let mut post = Post::from_new(1, sample(), now);

        post.apply(sample(), now);

        assert!(post.updated_at > post.created_at);
    }

    #[test]
    fn test_serializes_camel_case() {
        let post = Post::from_new(1, sample(), Utc::now());
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["tags"], serde_json::json!(["rust", "memory"]));
    }
}
