//! Blog listing and post pages.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
    routing::get,
};
use serde::Serialize;

use crate::content::{ImageRef, PostSummary, RelatedPost, render_blocks};
use crate::error::AppResult;
use crate::locale::{Locale, format};
use crate::middleware::ResolvedLocale;
use crate::state::AppState;

use super::helpers::{not_found_page, page_context, render_page};

const POST_PLACEHOLDER: &str = "/static/images/placeholder.svg";

/// Create the blog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{locale}/blog", get(list_posts))
        .route("/{locale}/blog/{slug}", get(view_post))
}

/// Post as shown on cards (listing, home page, related posts).
#[derive(Debug, Serialize)]
pub(super) struct PostCard {
    title: String,
    href: String,
    image: String,
    date: Option<String>,
    date_iso: Option<String>,
    excerpt: Option<String>,
    categories: Vec<String>,
}

pub(super) fn post_card(state: &AppState, post: &PostSummary, locale: Locale) -> PostCard {
    PostCard {
        title: post.title.clone(),
        href: post_href(locale, &post.slug.current),
        image: image_url(state, post.main_image.as_ref()),
        date: post.published_at.map(|d| format::long_date(&d, locale)),
        date_iso: post.published_at.map(|d| d.to_rfc3339()),
        excerpt: post.excerpt.clone(),
        categories: post.categories.clone(),
    }
}

fn related_card(state: &AppState, post: &RelatedPost, locale: Locale) -> PostCard {
    PostCard {
        title: post.title.clone(),
        href: post_href(locale, &post.slug.current),
        image: image_url(state, post.main_image.as_ref()),
        date: post.published_at.map(|d| format::long_date(&d, locale)),
        date_iso: post.published_at.map(|d| d.to_rfc3339()),
        excerpt: None,
        categories: Vec::new(),
    }
}

fn post_href(locale: Locale, slug: &str) -> String {
    format!("/{}/blog/{slug}", locale.code())
}

fn image_url(state: &AppState, image: Option<&ImageRef>) -> String {
    state.images().url_or(image, POST_PLACEHOLDER)
}

async fn list_posts(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
    uri: Uri,
) -> AppResult<Response> {
    let posts = state.content().posts(locale).await?;
    let cards: Vec<PostCard> = posts
        .iter()
        .map(|p| post_card(&state, p, locale))
        .collect();

    let translations = state.translations();
    let title = translations.lookup(locale, "blog.title");
    let description = translations.lookup(locale, "blog.description");

    let mut context = page_context(&state, locale, &uri, Some(&title), &description);
    context.insert("posts", &cards);

    Ok(render_page(&state, "blog_list.html", &context, StatusCode::OK))
}

#[derive(Debug, Serialize)]
struct PostView {
    title: String,
    image: Option<String>,
    date: Option<String>,
    date_iso: Option<String>,
    author: Option<String>,
    categories: Vec<String>,
    body_html: String,
}

async fn view_post(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
    Path((_, slug)): Path<(String, String)>,
    uri: Uri,
) -> AppResult<Response> {
    let Some(post) = state.content().post_by_slug(&slug, locale).await? else {
        tracing::debug!(slug = %slug, locale = %locale, "post not found");
        return Ok(not_found_page(
            &state,
            locale,
            &uri,
            "blog.not_found",
            ("/blog", "blog.back"),
        ));
    };

    let images = state.images();
    let view = PostView {
        title: post.title.clone(),
        image: images.url_for(post.main_image.as_ref()),
        date: post.published_at.map(|d| format::long_date(&d, locale)),
        date_iso: post.published_at.map(|d| d.to_rfc3339()),
        author: post.author.as_ref().map(|a| a.name.clone()),
        categories: post.categories.clone(),
        body_html: render_blocks(&post.body, images),
    };
    let related: Vec<PostCard> = post
        .related_posts
        .iter()
        .map(|p| related_card(&state, p, locale))
        .collect();

    let description = post
        .excerpt
        .clone()
        .unwrap_or_else(|| state.translations().lookup(locale, "blog.description"));

    let mut context = page_context(&state, locale, &uri, Some(&post.title), &description);
    context.insert("post", &view);
    context.insert("related", &related);

    Ok(render_page(&state, "blog_post.html", &context, StatusCode::OK))
}
