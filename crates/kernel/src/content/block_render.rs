//! Server-side rendering for portable text post bodies.
//!
//! Converts the block array into semantic HTML:
//! - Text blocks with `normal`, `h1`–`h4` and `blockquote` styles
//! - Consecutive list items grouped into `<ul>` / `<ol>`
//! - Inline decorators (`strong`, `em`, `code`, `underline`, `strike-through`)
//!   and link annotations
//! - Image blocks resolved through the [`ImageResolver`]
//!
//! All text and attribute values are escaped; unknown block types and marks
//! are skipped.

use serde::{Deserialize, Serialize};

use super::{ImageRef, ImageResolver, null_as_default};
use crate::routes::helpers::html_escape;

/// One entry of a portable text array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageRef),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,
    /// `bullet` or `number` when the block is a list item.
    #[serde(default)]
    pub list_item: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// Annotation referenced from a span's marks by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Render a portable text array into a single HTML string.
pub fn render_blocks(blocks: &[Block], images: &ImageResolver) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list_tag = match block {
            Block::Text(text) => text.list_item.as_deref().map(list_tag),
            _ => None,
        };

        if open_list != list_tag {
            if let Some(tag) = open_list.take() {
                html.push_str(&format!("</{tag}>"));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{tag}>"));
                open_list = Some(tag);
            }
        }

        match block {
            Block::Text(text) if list_tag.is_some() => {
                html.push_str(&format!("<li>{}</li>", render_spans(text)));
            }
            Block::Text(text) => html.push_str(&render_text_block(text)),
            Block::Image(image) => html.push_str(&render_image(image, images)),
            Block::Unknown => {}
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{tag}>"));
    }

    html
}

fn list_tag(kind: &str) -> &'static str {
    if kind == "number" { "ol" } else { "ul" }
}

fn render_text_block(block: &TextBlock) -> String {
    let tag = match block.style.as_deref() {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("blockquote") => "blockquote",
        _ => "p",
    };
    format!("<{tag}>{}</{tag}>", render_spans(block))
}

fn render_spans(block: &TextBlock) -> String {
    let mut html = String::new();

    for span in &block.children {
        let mut open = String::new();
        let mut close = Vec::new();

        for mark in &span.marks {
            let tag = match mark.as_str() {
                "strong" => Some(("<strong>".to_string(), "</strong>")),
                "em" => Some(("<em>".to_string(), "</em>")),
                "code" => Some(("<code>".to_string(), "</code>")),
                "underline" => Some(("<u>".to_string(), "</u>")),
                "strike-through" => Some(("<s>".to_string(), "</s>")),
                key => link_open_tag(block, key).map(|open| (open, "</a>")),
            };
            if let Some((o, c)) = tag {
                open.push_str(&o);
                close.push(c);
            }
        }

        html.push_str(&open);
        html.push_str(&html_escape(&span.text));
        for c in close.iter().rev() {
            html.push_str(c);
        }
    }

    html
}

fn link_open_tag(block: &TextBlock, key: &str) -> Option<String> {
    let def = block
        .mark_defs
        .iter()
        .find(|d| d.key == key && d.kind == "link")?;
    let href = def.href.as_deref()?.trim();
    if !is_safe_href(href) {
        return None;
    }
    Some(format!("<a href=\"{}\">", html_escape(href)))
}

/// http(s), mailto, and site-relative links only.
fn is_safe_href(href: &str) -> bool {
    href.starts_with("https://")
        || href.starts_with("http://")
        || href.starts_with("mailto:")
        || (href.starts_with('/') && !href.starts_with("//"))
}

fn render_image(image: &ImageRef, images: &ImageResolver) -> String {
    let Some(url) = images.url_for(Some(image)) else {
        return String::new();
    };
    let alt = html_escape(image.alt.as_deref().unwrap_or(" "));
    let mut html = format!("<figure><img src=\"{}\" alt=\"{alt}\">", html_escape(&url));
    if let Some(caption) = image.caption.as_deref().filter(|c| !c.is_empty()) {
        html.push_str(&format!("<figcaption>{}</figcaption>", html_escape(caption)));
    }
    html.push_str("</figure>");
    html
}
