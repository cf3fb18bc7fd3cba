//! HTTP route handlers.

pub mod blog;
pub mod health;
pub mod helpers;
pub mod pages;
pub mod static_files;

use axum::{
    Router,
    extract::State,
    http::Uri,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::middleware::{PathClassification, classify_path, require_locale_prefix};
use crate::state::AppState;

/// Build the application router with the locale guard applied.
///
/// The guard wraps every route and the fallback, so unmatched paths such as
/// `/` are redirected too.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(static_files::router())
        .merge(pages::router())
        .merge(blog::router())
        .fallback(fallback)
        .layer(from_fn_with_state(state.clone(), require_locale_prefix))
        .with_state(state)
}

/// Unmatched paths: a localized 404 page under a locale, plain 404 elsewhere.
async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    match classify_path(uri.path(), state.locales()) {
        PathClassification::Prefixed(locale) => helpers::not_found_page(
            &state,
            locale,
            &uri,
            "site.not_found",
            ("/", "nav.home"),
        ),
        PathClassification::Unprefixed => AppError::NotFound.into_response(),
    }
}
