//! Content store seam.
//!
//! Pages only ever ask two questions of the store: the posts for a
//! language, and one post by slug for a language. "Not found" is `Ok(None)`;
//! `Err` is reserved for the store being unreachable or returning garbage.

use std::cmp::Reverse;

use async_trait::async_trait;

use super::{ContentStoreError, Post, PostSummary};
use crate::locale::Locale;

/// Read-only access to localized documents.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All posts in `language`, newest first.
    async fn posts(&self, language: Locale) -> Result<Vec<PostSummary>, ContentStoreError>;

    /// One post by slug in `language`, with its related posts.
    async fn post_by_slug(
        &self,
        slug: &str,
        language: Locale,
    ) -> Result<Option<Post>, ContentStoreError>;
}

/// In-memory store.
///
/// Used when no remote project is configured, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContentStore {
    posts: Vec<(Locale, Post)>,
}

impl StaticContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post in the given language.
    pub fn with_post(mut self, language: Locale, post: Post) -> Self {
        self.posts.push((language, post));
        self
    }
}

#[async_trait]
impl ContentStore for StaticContentStore {
    async fn posts(&self, language: Locale) -> Result<Vec<PostSummary>, ContentStoreError> {
        let mut posts: Vec<PostSummary> = self
            .posts
            .iter()
            .filter(|(lang, _)| *lang == language)
            .map(|(_, post)| post.summary())
            .collect();
        // Stable sort: undated posts sink to the end in insertion order
        posts.sort_by_key(|p| Reverse(p.published_at));
        Ok(posts)
    }

    async fn post_by_slug(
        &self,
        slug: &str,
        language: Locale,
    ) -> Result<Option<Post>, ContentStoreError> {
        Ok(self
            .posts
            .iter()
            .find(|(lang, post)| *lang == language && post.slug.current == slug)
            .map(|(_, post)| post.clone()))
    }
}
