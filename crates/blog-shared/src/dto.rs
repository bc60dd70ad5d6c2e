//! Data Transfer Objects - request types for the API.

use serde::Deserialize;

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// `id`, `createdAt` and `updatedAt` may be present in the body but are
/// ignored; storage assigns them.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

impl SearchQuery {
    /// The search term, if one was given and it is not empty.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.is_empty())
    }
}
