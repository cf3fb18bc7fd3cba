#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations: the same router `main` serves, backed by an
//! in-memory content store seeded from fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use attaouia_kernel::config::Config;
use attaouia_kernel::content::{
    ContentStore, ContentStoreError, Post, PostSummary, SanityConfig, StaticContentStore,
};
use attaouia_kernel::locale::Locale;
use attaouia_kernel::routes;
use attaouia_kernel::state::AppState;
use attaouia_test_utils::{blocks, test_post};

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App with the default locale setup and the fixture posts.
    pub fn new() -> Self {
        Self::with_store(Arc::new(fixture_store()))
    }

    /// App with the default locale setup and the given content store.
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        Self::with_config(test_config(), store)
    }

    pub fn with_config(config: Config, store: Arc<dyn ContentStore>) -> Self {
        let state = AppState::with_content_store(&config, store)
            .expect("Failed to initialize AppState");
        let router = routes::router(state.clone());
        Self { router, state }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET without an `Accept-Language` header.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET with an `Accept-Language` header.
    pub async fn get_with_language(&self, uri: &str, accept_language: &str) -> Response {
        self.request(
            Request::get(uri)
                .header(header::ACCEPT_LANGUAGE, accept_language)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Default configuration pointed at the test fixtures.
///
/// A content project is configured so image references resolve, but the
/// store itself is always injected.
pub fn test_config() -> Config {
    Config {
        static_dir: fixtures_dir().join("static"),
        sanity: Some(SanityConfig {
            project_id: "testproj".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
            use_cdn: true,
        }),
        ..Config::default()
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// The asset directory the site ships with (`<workspace>/static`).
pub fn shipped_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static")
}

/// Local asset URLs referenced from `src` and `href` attributes.
pub fn local_asset_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();
    for attribute in ["src=\"", "href=\""] {
        for (start, _) in html.match_indices(attribute) {
            let rest = &html[start + attribute.len()..];
            let Some(end) = rest.find('"') else { continue };
            let link = &rest[..end];
            if link.starts_with("/static/") || link == "/favicon.ico" {
                links.push(link.to_string());
            }
        }
    }
    links.sort();
    links.dedup();
    links
}

fn post(doc: serde_json::Value) -> Post {
    serde_json::from_value(doc).expect("fixture post should decode")
}

/// Two French posts, one English post, nothing in Arabic.
pub fn fixture_store() -> StaticContentStore {
    StaticContentStore::new()
        .with_post(
            Locale::Fr,
            post(
                test_post("jardin-communautaire", "Le jardin communautaire")
                    .published_at("2025-02-10T08:00:00Z")
                    .with_excerpt("Premières récoltes du jardin.")
                    .with_category("Communauté")
                    .with_author("Amina")
                    .with_main_image("image-abc123-1200x800-jpg")
                    .with_block(blocks::styled("h2", "Les récoltes"))
                    .with_paragraph("Merci aux bénévoles & voisins.")
                    .with_block(blocks::list_item("bullet", "Tomates"))
                    .with_block(blocks::list_item("bullet", "Menthe"))
                    .with_related("eau-potable", "Eau potable")
                    .to_json(),
            ),
        )
        .with_post(
            Locale::Fr,
            post(
                test_post("eau-potable", "Eau potable")
                    .published_at("2024-11-02T10:00:00Z")
                    .to_json(),
            ),
        )
        .with_post(
            Locale::En,
            post(
                test_post("community-garden", "The community garden")
                    .published_at("2025-02-10T08:00:00Z")
                    .with_paragraph("Thanks to every volunteer.")
                    .to_json(),
            ),
        )
}

/// Content store that always fails as if the remote API were down.
pub struct UnavailableStore;

#[async_trait]
impl ContentStore for UnavailableStore {
    async fn posts(&self, _language: Locale) -> Result<Vec<PostSummary>, ContentStoreError> {
        Err(unavailable())
    }

    async fn post_by_slug(
        &self,
        _slug: &str,
        _language: Locale,
    ) -> Result<Option<Post>, ContentStoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> ContentStoreError {
    ContentStoreError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// Read a response body as a UTF-8 string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// The `Location` header, if any.
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("Location is not ASCII").to_string())
}
