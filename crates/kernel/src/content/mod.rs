//! Content module.
//!
//! This module provides:
//! - Document types for blog posts as the headless content store returns them
//! - ContentStore: the query seam over the store (remote or in-memory)
//! - SanityClient: HTTP query API implementation
//! - ImageResolver: asset references → CDN URLs
//! - Block rendering for portable text bodies
//! - Static listings for events and initiatives

pub mod block_render;
pub mod image;
pub mod listings;
pub mod sanity;
mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub use block_render::render_blocks;
pub use image::ImageResolver;
pub use listings::{Event, EventLocation, Initiative, InitiativeStatus};
pub use sanity::{SanityClient, SanityConfig};
pub use store::{ContentStore, StaticContentStore};

/// Errors raised while talking to the content store.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    #[error("content store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode content store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid content store URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// URL slug wrapper (`{ "current": "my-post" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

/// Reference to an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Image field: an asset reference plus optional alt text and caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ImageRef {
    pub fn from_asset(reference: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetRef {
                reference: reference.into(),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// A post as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// A post referenced from another post's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// A full post with its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<block_render::Block>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_posts: Vec<RelatedPost>,
}

impl Post {
    /// Listing view of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            main_image: self.main_image.clone(),
            published_at: self.published_at,
            excerpt: self.excerpt.clone(),
            categories: self.categories.clone(),
            author: self.author.clone(),
        }
    }
}
