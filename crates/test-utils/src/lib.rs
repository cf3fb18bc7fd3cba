//! Test utilities for the El Attaouia site.
//!
//! Helpers for integration testing: content store document fixtures,
//! `Accept-Language` samples, and assertion utilities.

use serde_json::{Value as JsonValue, json};

/// Create a test post document with default values.
///
/// The document has the shape the content store query API returns, so it
/// can be deserialized straight into the kernel's post types.
pub fn test_post(slug: &str, title: &str) -> TestPost {
    TestPost {
        id: format!("post-{slug}"),
        title: title.to_string(),
        slug: slug.to_string(),
        published_at: Some("2025-01-15T09:00:00Z".to_string()),
        excerpt: None,
        main_image: None,
        categories: Vec::new(),
        author: None,
        body: Vec::new(),
        related: Vec::new(),
    }
}

/// A test post builder for creating fixtures.
#[derive(Debug, Clone)]
pub struct TestPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub published_at: Option<String>,
    pub excerpt: Option<String>,
    pub main_image: Option<String>,
    pub categories: Vec<String>,
    pub author: Option<String>,
    pub body: Vec<JsonValue>,
    pub related: Vec<JsonValue>,
}

impl TestPost {
    /// Set a custom ID.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Set the publication timestamp (RFC 3339).
    pub fn published_at(mut self, timestamp: &str) -> Self {
        self.published_at = Some(timestamp.to_string());
        self
    }

    /// Clear the publication timestamp.
    pub fn undated(mut self) -> Self {
        self.published_at = None;
        self
    }

    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_string());
        self
    }

    /// Set the main image by asset reference (`image-<id>-<W>x<H>-<ext>`).
    pub fn with_main_image(mut self, asset_ref: &str) -> Self {
        self.main_image = Some(asset_ref.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.categories.push(category.to_string());
        self
    }

    pub fn with_author(mut self, name: &str) -> Self {
        self.author = Some(name.to_string());
        self
    }

    /// Append a body block.
    pub fn with_block(mut self, block: JsonValue) -> Self {
        self.body.push(block);
        self
    }

    /// Append a plain paragraph to the body.
    pub fn with_paragraph(self, text: &str) -> Self {
        self.with_block(blocks::paragraph(text))
    }

    /// Add a related post reference.
    pub fn with_related(mut self, slug: &str, title: &str) -> Self {
        self.related.push(json!({
            "_id": format!("post-{slug}"),
            "title": title,
            "slug": { "current": slug },
        }));
        self
    }

    /// Serialize as a content store document.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "_id": self.id,
            "title": self.title,
            "slug": { "current": self.slug },
            "mainImage": self.main_image.as_ref().map(|r| json!({ "asset": { "_ref": r } })),
            "publishedAt": self.published_at,
            "excerpt": self.excerpt,
            "categories": self.categories,
            "author": self.author.as_ref().map(|name| json!({ "name": name })),
            "body": self.body,
            "relatedPosts": self.related,
        })
    }
}

/// Portable text block builders.
pub mod blocks {
    use serde_json::{Value, json};

    /// A `normal` paragraph with one unmarked span.
    pub fn paragraph(text: &str) -> Value {
        styled("normal", text)
    }

    /// A text block with the given style (`h2`, `blockquote`, ...).
    pub fn styled(style: &str, text: &str) -> Value {
        json!({
            "_type": "block",
            "style": style,
            "markDefs": [],
            "children": [{ "_type": "span", "text": text, "marks": [] }],
        })
    }

    /// A list item block (`bullet` or `number`).
    pub fn list_item(kind: &str, text: &str) -> Value {
        json!({
            "_type": "block",
            "style": "normal",
            "listItem": kind,
            "level": 1,
            "children": [{ "_type": "span", "text": text }],
        })
    }

    /// A paragraph whose only span links to `href`.
    pub fn link(text: &str, href: &str) -> Value {
        json!({
            "_type": "block",
            "style": "normal",
            "markDefs": [{ "_key": "l1", "_type": "link", "href": href }],
            "children": [{ "_type": "span", "text": text, "marks": ["l1"] }],
        })
    }

    /// An image block.
    pub fn image(asset_ref: &str, alt: &str) -> Value {
        json!({
            "_type": "image",
            "asset": { "_ref": asset_ref },
            "alt": alt,
        })
    }
}

/// Representative `Accept-Language` header values.
pub mod accept_language {
    /// French-Canadian browser with English fallback.
    pub const FRENCH_CANADIAN: &str = "fr-CA,fr;q=0.9,en;q=0.8";

    /// English first, Arabic second.
    pub const ENGLISH_THEN_ARABIC: &str = "en-US,en;q=0.9,ar;q=0.5";

    /// Only languages the site does not offer.
    pub const UNSUPPORTED_ONLY: &str = "de-DE,de;q=0.9,es;q=0.5";

    /// Malformed entries around one valid one.
    pub const MALFORMED_MIX: &str = ";;, 12345, fr;q=abc, en;q=0.3";

    /// Every entry explicitly refused.
    pub const ALL_REFUSED: &str = "fr;q=0, en;q=0";
}

/// Assertion helpers for response bodies.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{}', got: {}",
            key,
            value
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }
}
