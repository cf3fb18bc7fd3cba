//! Sanity HTTP query API client.
//!
//! Queries are GROQ strings sent as the `query` parameter; query variables
//! travel as `$name` parameters holding JSON-encoded values.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{ContentStore, ContentStoreError, Post, PostSummary};
use crate::locale::Locale;

/// All posts in a language, newest first.
pub const ALL_POSTS_QUERY: &str = r#"*[_type == "post" && language == $language] | order(publishedAt desc) {
  _id,
  title,
  slug,
  mainImage,
  publishedAt,
  excerpt,
  "categories": categories[]->title,
  "author": author->{name, image}
}"#;

/// One post by slug in a language, with posts that reference it.
pub const POST_BY_SLUG_QUERY: &str = r#"*[_type == "post" && slug.current == $slug && language == $language][0] {
  _id,
  title,
  slug,
  mainImage,
  body,
  publishedAt,
  excerpt,
  "categories": categories[]->title,
  "author": author->{name, image},
  "relatedPosts": *[_type == "post" && language == $language && references(^._id)] {
    _id,
    title,
    slug,
    mainImage,
    publishedAt
  }
}"#;

/// Request timeout for content queries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a Sanity project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    /// API version date, e.g. "2024-01-01".
    pub api_version: String,
    pub token: Option<String>,
    /// Query the edge-cached API host.
    pub use_cdn: bool,
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Content store backed by the Sanity query API.
#[derive(Clone)]
pub struct SanityClient {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl SanityClient {
    /// Create a client for the given project.
    pub fn new(config: &SanityConfig) -> Result<Self, ContentStoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: query_endpoint(config)?,
            token: config.token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the full query URL with JSON-encoded variables.
    pub fn query_url(&self, query: &str, params: &[(&str, serde_json::Value)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<T, ContentStoreError> {
        let url = self.query_url(query, params);
        debug!(endpoint = %self.endpoint, "querying content store");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "content store query failed");
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: QueryResponse<T> = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn posts(&self, language: Locale) -> Result<Vec<PostSummary>, ContentStoreError> {
        let posts: Option<Vec<PostSummary>> = self
            .fetch(ALL_POSTS_QUERY, &[("language", language.code().into())])
            .await?;
        Ok(posts.unwrap_or_default())
    }

    async fn post_by_slug(
        &self,
        slug: &str,
        language: Locale,
    ) -> Result<Option<Post>, ContentStoreError> {
        self.fetch(
            POST_BY_SLUG_QUERY,
            &[("slug", slug.into()), ("language", language.code().into())],
        )
        .await
    }
}

/// `https://<project>.api.sanity.io/v<version>/data/query/<dataset>`
/// (or `apicdn.sanity.io` when the CDN is enabled).
fn query_endpoint(config: &SanityConfig) -> Result<Url, ContentStoreError> {
    let host = if config.use_cdn {
        "apicdn.sanity.io"
    } else {
        "api.sanity.io"
    };
    let version = config.api_version.trim_start_matches('v');
    let raw = format!(
        "https://{}.{host}/v{version}/data/query/{}",
        config.project_id, config.dataset
    );
    Ok(Url::parse(&raw)?)
}
