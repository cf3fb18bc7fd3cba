//! Shared route helpers for page rendering.

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::locale::Locale;
use crate::state::AppState;

/// Navigation entries as (path below the locale, translation key).
const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "nav.home"),
    ("/about", "nav.about"),
    ("/initiatives", "nav.initiatives"),
    ("/events", "nav.events"),
    ("/blog", "nav.blog"),
    ("/contact", "nav.contact"),
];

#[derive(Debug, Serialize)]
struct NavItem {
    href: String,
    label: String,
    active: bool,
}

#[derive(Debug, Serialize)]
struct LanguageLink {
    code: &'static str,
    name: &'static str,
    href: String,
    current: bool,
}

/// Rewrite a locale-prefixed path for another locale.
///
/// The current prefix is stripped only as a whole segment; a bare prefix
/// becomes `/`. Paths without the prefix are treated as unprefixed.
pub fn switch_locale_path(path: &str, current: Locale, target: Locale) -> String {
    let prefix = format!("/{}", current.code());
    let rest = match path.strip_prefix(prefix.as_str()) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    };

    let rest = if rest.is_empty() { "/" } else { rest };
    format!("/{}{}", target.code(), rest)
}

/// Path below the locale prefix (`/fr/blog/x` → `/blog/x`).
pub fn unlocalized_path(path: &str, locale: Locale) -> &str {
    match path.strip_prefix('/').and_then(|p| p.strip_prefix(locale.code())) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Build the Tera context shared by every page.
///
/// `title` is the page heading; `None` means the home page, whose title is
/// the site name alone.
pub fn page_context(
    state: &AppState,
    locale: Locale,
    uri: &Uri,
    title: Option<&str>,
    description: &str,
) -> tera::Context {
    let translations = state.translations();
    let site_name = translations.lookup(locale, "site.name");
    let page_title = match title {
        Some(title) => format!("{title} | {site_name}"),
        None => site_name.clone(),
    };

    let path = unlocalized_path(uri.path(), locale);
    let nav: Vec<NavItem> = NAV_ITEMS
        .iter()
        .map(|(target, key)| NavItem {
            href: localized(locale, target),
            label: translations.lookup(locale, key),
            active: is_active(path, target),
        })
        .collect();

    let query = uri.query().map(|q| format!("?{q}")).unwrap_or_default();
    let languages: Vec<LanguageLink> = state
        .locales()
        .switcher_order()
        .map(|target| LanguageLink {
            code: target.code(),
            name: target.native_name(),
            href: format!("{}{query}", switch_locale_path(uri.path(), locale, target)),
            current: target == locale,
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("locale", &locale);
    context.insert("lang", locale.code());
    context.insert("dir", &locale.direction());
    context.insert("t", &translations.table(locale));
    context.insert("site_name", &site_name);
    context.insert("page_title", &page_title);
    context.insert("meta_description", description);
    context.insert("nav", &nav);
    context.insert("languages", &languages);
    context
}

fn localized(locale: Locale, path: &str) -> String {
    if path == "/" {
        format!("/{}/", locale.code())
    } else {
        format!("/{}{path}", locale.code())
    }
}

fn is_active(current: &str, target: &str) -> bool {
    if target == "/" {
        return current == "/";
    }
    current
        .strip_prefix(target)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Render a page template, or a 500 page if rendering fails.
pub fn render_page(
    state: &AppState,
    template: &str,
    context: &tera::Context,
    status: StatusCode,
) -> Response {
    match state.theme().render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, template = %template, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    r#"<!DOCTYPE html>
<html><head><title>Error</title></head>
<body><h1>Template Error</h1><pre>{}</pre></body></html>"#,
                    html_escape(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}

/// Localized 404 page.
///
/// `heading_key` names the message; the page links back to `back_path`
/// (below the locale) labelled with `back_key`.
pub fn not_found_page(
    state: &AppState,
    locale: Locale,
    uri: &Uri,
    heading_key: &str,
    (back_path, back_key): (&str, &str),
) -> Response {
    let translations = state.translations();
    let heading = translations.lookup(locale, heading_key);
    let description = translations.lookup(locale, "site.description");

    let mut context = page_context(state, locale, uri, Some(&heading), &description);
    context.insert("heading", &heading);
    context.insert("back_href", &localized(locale, back_path));
    context.insert("back_label", &translations.lookup(locale, back_key));

    render_page(state, "not_found.html", &context, StatusCode::NOT_FOUND)
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
