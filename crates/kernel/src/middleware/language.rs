//! Locale prefix enforcement.
//!
//! Every page route lives under `/<locale>`. For each request outside the
//! exclusion list the guard classifies the path:
//!
//! - already prefixed with a supported locale → pass through, with the
//!   locale stored in request extensions as [`ResolvedLocale`];
//! - otherwise → negotiate a locale from `Accept-Language` and redirect to
//!   `/<locale><original path>` with the query string carried over.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode, Uri, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::error::AppError;
use crate::locale::{Locale, SupportedLocales, negotiate::negotiate_header};
use crate::state::AppState;

/// Default guard bypass list: API routes, static assets, the image
/// directory, the favicon and the health probe.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] =
    &["/api", "/static", "/images", "/favicon.ico", "/health"];

/// The locale governing the current request.
///
/// Stored in request extensions for per-request access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

impl<S: Send + Sync> FromRequestParts<S> for ResolvedLocale {
    type Rejection = AppError;

    /// Page handlers only run behind the guard; a missing locale means the
    /// route was reached some other way.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedLocale>()
            .copied()
            .ok_or(AppError::NotFound)
    }
}

/// Result of inspecting a request path for a locale prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClassification {
    /// Path is `/<locale>` or starts with `/<locale>/`.
    Prefixed(Locale),
    /// Path carries no supported locale prefix.
    Unprefixed,
}

/// Classify a path by its first segment.
///
/// Only exact codes followed by `/` or end-of-path match, so `/enterprise`
/// and `/arabic` are unprefixed. Matching is case-sensitive.
pub fn classify_path(path: &str, supported: &SupportedLocales) -> PathClassification {
    let Some(trimmed) = path.strip_prefix('/') else {
        return PathClassification::Unprefixed;
    };

    let candidate = match trimmed.find('/') {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };

    match supported.get(candidate) {
        Some(locale) => PathClassification::Prefixed(locale),
        None => PathClassification::Unprefixed,
    }
}

/// Paths the guard never touches.
///
/// A prefix matches the path itself or anything below it (`/api` matches
/// `/api` and `/api/posts`, not `/apiary`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteExclusions {
    prefixes: Vec<String>,
}

impl RouteExclusions {
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    p.trim_end_matches('/').to_string()
                })
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl Default for RouteExclusions {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().copied())
    }
}

/// What the guard does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Path is on the exclusion list; no classification performed.
    Excluded,
    /// Path is already locale-prefixed.
    PassThrough(Locale),
    /// Path needs a locale; redirect to `location`.
    Redirect { locale: Locale, location: String },
}

/// Decide how to handle a request (sync, testable).
pub fn decide(
    uri: &Uri,
    headers: &HeaderMap,
    supported: &SupportedLocales,
    exclusions: &RouteExclusions,
) -> GuardDecision {
    let path = uri.path();

    if exclusions.matches(path) {
        return GuardDecision::Excluded;
    }

    if let PathClassification::Prefixed(locale) = classify_path(path, supported) {
        return GuardDecision::PassThrough(locale);
    }

    // Unreadable (non-ASCII) header values count as no preference.
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = negotiate_header(accept_language, supported);

    GuardDecision::Redirect {
        locale,
        location: redirect_target(uri, locale),
    }
}

/// Build `/<locale><path>` and carry over the query string.
///
/// Duplicate keys collapse to their last value, kept at the position of the
/// first occurrence.
///
/// The query is decoded and re-encoded as form data, so parameter names and
/// values survive but not their exact bytes: spaces become `+`, a bare key
/// gains `=`, and invalid UTF-8 is replaced with U+FFFD.
pub fn redirect_target(uri: &Uri, locale: Locale) -> String {
    let mut target = format!("/{}{}", locale.code(), uri.path());

    let Some(query) = uri.query() else {
        return target;
    };

    let mut params: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value.into_owned(),
            None => params.push((key.into_owned(), value.into_owned())),
        }
    }

    if !params.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();
        target.push('?');
        target.push_str(&encoded);
    }

    target
}

/// Middleware enforcing a locale prefix on every non-excluded route.
pub async fn require_locale_prefix(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match decide(
        request.uri(),
        request.headers(),
        state.locales(),
        state.route_exclusions(),
    ) {
        GuardDecision::Excluded => next.run(request).await,
        GuardDecision::PassThrough(locale) => {
            request.extensions_mut().insert(ResolvedLocale(locale));
            next.run(request).await
        }
        GuardDecision::Redirect { locale, location } => {
            tracing::debug!(
                original = %request.uri(),
                location = %location,
                locale = %locale,
                "redirecting to locale-prefixed path"
            );
            locale_redirect(&location)
        }
    }
}

fn locale_redirect(location: &str) -> Response {
    let Ok(value) = HeaderValue::from_str(location) else {
        tracing::warn!(location = %location, "refusing redirect with invalid Location header");
        return StatusCode::BAD_REQUEST.into_response();
    };

    (
        StatusCode::TEMPORARY_REDIRECT,
        [
            (header::LOCATION, value),
            (header::VARY, HeaderValue::from_static("accept-language")),
        ],
    )
        .into_response()
}
