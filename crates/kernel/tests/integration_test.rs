#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the site router.
//!
//! These tests drive the REAL router (locale guard, routes, templates) with
//! an in-memory content store. No network access is needed.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test integration_test
//! ```

use std::sync::Arc;

use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use attaouia_kernel::config::Config;
use attaouia_test_utils::{accept_language, assert};

mod common;
use common::{
    TestApp, UnavailableStore, body_string, fixture_store, fixtures_dir, local_asset_links,
    location, shipped_static_dir, test_config,
};

// =============================================================================
// Locale redirects
// =============================================================================

#[tokio::test]
async fn root_redirects_to_negotiated_locale() {
    let app = TestApp::new();

    let response = app
        .get_with_language("/", accept_language::FRENCH_CANADIAN)
        .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/fr/"));
    assert_eq!(
        response.headers().get(header::VARY).unwrap(),
        "accept-language"
    );
}

#[tokio::test]
async fn missing_header_redirects_to_default_locale() {
    let app = TestApp::new();

    let response = app.get("/about").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/ar/about"));
}

#[tokio::test]
async fn unsupported_languages_fall_back_to_default() {
    let app = TestApp::new();

    let response = app
        .get_with_language("/events", accept_language::UNSUPPORTED_ONLY)
        .await;
    assert_eq!(location(&response).as_deref(), Some("/ar/events"));

    let response = app
        .get_with_language("/events", accept_language::ALL_REFUSED)
        .await;
    assert_eq!(location(&response).as_deref(), Some("/ar/events"));
}

#[tokio::test]
async fn malformed_entries_are_skipped() {
    let app = TestApp::new();

    // "fr;q=abc" is dropped, leaving English
    let response = app
        .get_with_language("/blog", accept_language::MALFORMED_MIX)
        .await;
    assert_eq!(location(&response).as_deref(), Some("/en/blog"));
}

#[tokio::test]
async fn redirect_preserves_query_with_last_value_winning() {
    let app = TestApp::new();

    let response = app
        .get_with_language("/blog?page=2&tag=garden&page=3", accept_language::ENGLISH_THEN_ARABIC)
        .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response).as_deref(),
        Some("/en/blog?page=3&tag=garden")
    );
}

#[tokio::test]
async fn locale_segment_must_match_exactly() {
    let app = TestApp::new();

    // Case-sensitive, whole-segment matching
    let response = app.get("/FR/about").await;
    assert_eq!(location(&response).as_deref(), Some("/ar/FR/about"));

    let response = app.get("/french").await;
    assert_eq!(location(&response).as_deref(), Some("/ar/french"));
}

#[tokio::test]
async fn redirect_target_is_served_without_another_redirect() {
    let app = TestApp::new();

    let response = app
        .get_with_language("/contact", accept_language::FRENCH_CANADIAN)
        .await;
    let target = location(&response).unwrap();

    let response = app
        .get_with_language(&target, accept_language::FRENCH_CANADIAN)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Excluded routes
// =============================================================================

#[tokio::test]
async fn health_check_reports_locales() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "status": "healthy", "locales": ["en", "fr", "ar"], "default_locale": "ar" })
    );
}

#[tokio::test]
async fn api_paths_are_never_redirected() {
    let app = TestApp::new();

    let response = app
        .get_with_language("/api/posts", accept_language::FRENCH_CANADIAN)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn exclusion_prefixes_match_whole_segments() {
    let app = TestApp::new();

    let response = app.get("/apiary").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/ar/apiary"));
}

#[tokio::test]
async fn static_files_are_served() {
    let app = TestApp::new();

    let response = app.get("/static/css/site.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
    assert_eq!(body_string(response).await, "body { margin: 0; }\n");

    let response = app.get("/favicon.ico").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "fixture-icon");
}

#[tokio::test]
async fn pages_only_link_assets_the_site_ships() {
    let config = Config {
        static_dir: shipped_static_dir(),
        ..test_config()
    };
    let app = TestApp::with_config(config, Arc::new(fixture_store()));

    let mut links = Vec::new();
    for page in [
        "/en/",
        "/en/events",
        "/en/initiatives",
        "/en/blog",
        "/fr/blog/jardin-communautaire",
    ] {
        let response = app.get(page).await;
        assert_eq!(response.status(), StatusCode::OK, "{page}");
        links.extend(local_asset_links(&body_string(response).await));
    }
    links.sort();
    links.dedup();

    for expected in [
        "/favicon.ico",
        "/static/css/site.css",
        "/static/images/placeholder.svg",
        "/static/images/placeholder-event.svg",
        "/static/images/placeholder-initiative.svg",
    ] {
        assert!(links.iter().any(|l| l == expected), "{expected} not linked: {links:?}");
    }

    for link in &links {
        let response = app.get(link).await;
        assert_eq!(response.status(), StatusCode::OK, "{link}");
    }

    let response = app.get("/favicon.ico").await;
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/x-icon"
    );
    let response = app.get("/static/images/placeholder-event.svg").await;
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/svg+xml"
    );
}

#[tokio::test]
async fn static_files_reject_traversal() {
    let app = TestApp::new();

    let response = app.get("/static/css/..%2F..%2Fintegration_test.rs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/static/missing.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn home_page_title_is_site_name() {
    let app = TestApp::new();

    for uri in ["/en", "/en/"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let body = body_string(response).await;
        assert::contains(&body, r#"<html lang="en" dir="ltr">"#);
        assert::contains(&body, "<title>El Attaouia Association</title>");
        assert::contains(&body, "Building a Better Community Together");
        assert::contains(&body, "The community garden");
    }
}

#[tokio::test]
async fn arabic_pages_are_right_to_left() {
    let app = TestApp::new();

    let response = app.get("/ar/about").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert::contains(&body, r#"<html lang="ar" dir="rtl">"#);
    assert::contains(&body, "<title>من نحن | جمعية العطاوية</title>");
}

#[tokio::test]
async fn navigation_and_switcher_are_localized() {
    let app = TestApp::new();

    let response = app.get("/fr/blog?page=2").await;
    let body = body_string(response).await;

    assert::contains(&body, r#"<a href="/fr/about">À propos</a>"#);
    assert::contains(&body, r#"href="/fr/blog" aria-current="page""#);

    // Switcher lists ar, fr, en in that order and keeps the query string
    let ar = body.find(r#"<a href="/ar/blog?page=2" hreflang="ar""#).unwrap();
    let fr = body.find(r#"<a href="/fr/blog?page=2" hreflang="fr""#).unwrap();
    let en = body.find(r#"<a href="/en/blog?page=2" hreflang="en""#).unwrap();
    assert!(ar < fr && fr < en);
    assert::contains(&body, r#"aria-current="true" class="current">Français</a>"#);
}

#[tokio::test]
async fn static_pages_render_in_every_locale() {
    let app = TestApp::new();

    for locale in ["en", "fr", "ar"] {
        for page in ["about", "contact", "events", "initiatives"] {
            let uri = format!("/{locale}/{page}");
            let response = app.get(&uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}

#[tokio::test]
async fn events_use_localized_dates() {
    let app = TestApp::new();

    let body = body_string(app.get("/en/events").await).await;
    assert::contains(&body, "Annual Charity Gala");
    assert::contains(&body, "Saturday, March 15, 2025");
    assert::contains(&body, "06:00 PM - 10:00 PM");
    assert::contains(&body, "Grand Hall, El Attaouia");

    let body = body_string(app.get("/fr/events").await).await;
    assert::contains(&body, "samedi 15 mars 2025");
    assert::contains(&body, "18:00 - 22:00");
}

#[tokio::test]
async fn initiatives_show_localized_status() {
    let app = TestApp::new();

    let body = body_string(app.get("/ar/initiatives").await).await;
    assert::contains(&body, "Community Garden Project");
    assert::contains(&body, r#"<span class="badge status-in-progress">قيد التنفيذ</span>"#);
}

#[tokio::test]
async fn unknown_page_under_locale_is_localized_404() {
    let app = TestApp::new();

    let response = app.get("/fr/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_string(response).await;
    assert::contains(&body, "Page introuvable");
    assert::contains(&body, r#"lang="fr""#);
}

#[tokio::test]
async fn template_overrides_are_applied() {
    let config = Config {
        templates_dir: Some(fixtures_dir().join("templates")),
        ..test_config()
    };
    let app = TestApp::with_config(config, Arc::new(fixture_store()));

    let body = body_string(app.get("/en/about").await).await;
    assert::contains(&body, r#"<p class="override">Our Mission</p>"#);
    // Untouched templates still come from the built-in set
    assert::contains(&body, "<title>About Us | El Attaouia Association</title>");
}

// =============================================================================
// Blog
// =============================================================================

#[tokio::test]
async fn blog_list_is_newest_first() {
    let app = TestApp::new();

    let response = app.get("/fr/blog").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let newer = body.find("Le jardin communautaire").unwrap();
    let older = body.find("Eau potable").unwrap();
    assert!(newer < older);
    assert::contains(&body, r#"href="/fr/blog/jardin-communautaire""#);
    assert::contains(&body, "10 février 2025");
    assert::not_contains(&body, "The community garden");
}

#[tokio::test]
async fn blog_list_without_posts_shows_empty_message() {
    let app = TestApp::new();

    let body = body_string(app.get("/ar/blog").await).await;
    assert::contains(&body, "لا توجد منشورات متاحة حاليًا");
}

#[tokio::test]
async fn blog_post_renders_body_and_related_posts() {
    let app = TestApp::new();

    let response = app.get("/fr/blog/jardin-communautaire").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert::contains(&body, "<title>Le jardin communautaire | Association ElAttaouia</title>");
    assert::contains(&body, "<h2>Les récoltes</h2>");
    assert::contains(&body, "<p>Merci aux bénévoles &amp; voisins.</p>");
    assert::contains(&body, "<ul><li>Tomates</li><li>Menthe</li></ul>");
    assert::contains(&body, "https://cdn.sanity.io/images/testproj/production/abc123-1200x800.jpg");
    assert::contains(&body, "Amina");
    assert::contains(&body, r#"href="/fr/blog/eau-potable""#);
    assert::contains(&body, r#"content="Premières récoltes du jardin.""#);
}

#[tokio::test]
async fn missing_post_is_localized_404() {
    let app = TestApp::new();

    let response = app.get("/fr/blog/introuvable").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert::contains(&body_string(response).await, "Article introuvable");

    // Slugs are looked up per language
    let response = app.get("/fr/blog/community-garden").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_store_outage() {
    let app = TestApp::with_store(Arc::new(UnavailableStore));

    let response = app.get("/en/blog").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = app.get("/en/blog/anything").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The home page degrades to an empty post list
    let response = app.get("/en/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert::contains(&body_string(response).await, "No posts available at the moment");
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn custom_locale_set_and_exclusions() {
    let config = Config {
        supported_locales: vec!["fr".to_string(), "en".to_string()],
        default_locale: "en".to_string(),
        excluded_prefixes: vec!["/feeds".to_string()],
        ..test_config()
    };
    let app = TestApp::with_config(config, Arc::new(fixture_store()));

    // Arabic is not offered, so an Arabic-only browser gets the default
    let response = app.get_with_language("/", "ar").await;
    assert_eq!(location(&response).as_deref(), Some("/en/"));

    // "/ar/..." is now an unprefixed path
    let response = app.get("/ar/about").await;
    assert_eq!(location(&response).as_deref(), Some("/en/ar/about"));

    // Only the configured prefixes bypass the guard
    let response = app.get("/feeds/rss").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}
