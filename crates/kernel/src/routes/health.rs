//! Health check endpoint.
//!
//! The site has no backing services it must reach to serve pages, so the
//! probe always reports healthy along with the active locale setup.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::locale::Locale;
use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    locales: Vec<Locale>,
    default_locale: Locale,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let locales = state.locales();
    Json(HealthResponse {
        status: "healthy",
        locales: locales.locales().to_vec(),
        default_locale: locales.default_locale(),
    })
}

/// Create the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
