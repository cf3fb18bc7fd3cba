//! Static site pages: home, about, contact, events, initiatives.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::Response,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::content::listings::{self, Event, EventLocation, Initiative};
use crate::locale::{Locale, format};
use crate::middleware::ResolvedLocale;
use crate::state::AppState;

use super::blog::{PostCard, post_card};
use super::helpers::{page_context, render_page};

/// Cards shown per home page section.
const HOME_SECTION_LIMIT: usize = 3;

/// Create the pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{locale}", get(home))
        .route("/{locale}/", get(home))
        .route("/{locale}/about", get(about))
        .route("/{locale}/contact", get(contact))
        .route("/{locale}/events", get(events))
        .route("/{locale}/initiatives", get(initiatives))
}

#[derive(Debug, Serialize)]
pub(super) struct EventCard {
    title: String,
    excerpt: String,
    image: String,
    date: String,
    start_iso: String,
    start_time: String,
    end_time: String,
    location: EventLocation,
}

fn event_card(event: &Event, locale: Locale) -> EventCard {
    EventCard {
        title: event.title.clone(),
        excerpt: event.excerpt.clone(),
        image: event.image.clone(),
        date: format::long_date_with_weekday(&event.start, locale),
        start_iso: event.start.to_rfc3339(),
        start_time: format::short_time(&event.start, locale),
        end_time: format::short_time(&event.end, locale),
        location: event.location.clone(),
    }
}

#[derive(Debug, Serialize)]
struct InitiativeCard {
    title: String,
    excerpt: String,
    image: String,
    status_label: String,
    status_class: &'static str,
}

fn initiative_card(state: &AppState, initiative: &Initiative, locale: Locale) -> InitiativeCard {
    InitiativeCard {
        title: initiative.title.clone(),
        excerpt: initiative.excerpt.clone(),
        image: initiative.image.clone(),
        status_label: state
            .translations()
            .lookup(locale, initiative.status.translation_key()),
        status_class: initiative.status.css_class(),
    }
}

/// Upcoming event cards, soonest first.
fn upcoming_event_cards(now: DateTime<Utc>, locale: Locale, limit: usize) -> Vec<EventCard> {
    let (upcoming, _) = listings::split_events(listings::events(), now);
    upcoming
        .iter()
        .take(limit)
        .map(|e| event_card(e, locale))
        .collect()
}

async fn home(State(state): State<AppState>, ResolvedLocale(locale): ResolvedLocale, uri: Uri) -> Response {
    // The home page still renders when the content store is down
    let posts: Vec<PostCard> = match state.content().posts(locale).await {
        Ok(posts) => posts
            .iter()
            .take(HOME_SECTION_LIMIT)
            .map(|p| post_card(&state, p, locale))
            .collect(),
        Err(e) => {
            warn!(error = %e, locale = %locale, "failed to load posts for home page");
            Vec::new()
        }
    };

    let description = state.translations().lookup(locale, "site.description");
    let mut context = page_context(&state, locale, &uri, None, &description);
    context.insert("posts", &posts);
    context.insert(
        "events",
        &upcoming_event_cards(Utc::now(), locale, HOME_SECTION_LIMIT),
    );

    render_page(&state, "home.html", &context, StatusCode::OK)
}

/// Render a page whose content comes entirely from the translation tables.
fn text_page(state: &AppState, locale: Locale, uri: &Uri, section: &str) -> Response {
    let translations = state.translations();
    let title = translations.lookup(locale, &format!("{section}.title"));
    let description = translations.lookup(locale, &format!("{section}.description"));
    let context = page_context(state, locale, uri, Some(&title), &description);
    render_page(state, &format!("{section}.html"), &context, StatusCode::OK)
}

async fn about(State(state): State<AppState>, ResolvedLocale(locale): ResolvedLocale, uri: Uri) -> Response {
    text_page(&state, locale, &uri, "about")
}

async fn contact(State(state): State<AppState>, ResolvedLocale(locale): ResolvedLocale, uri: Uri) -> Response {
    text_page(&state, locale, &uri, "contact")
}

async fn events(State(state): State<AppState>, ResolvedLocale(locale): ResolvedLocale, uri: Uri) -> Response {
    let translations = state.translations();
    let title = translations.lookup(locale, "events.title");
    let description = translations.lookup(locale, "events.description");

    let (upcoming, past) = listings::split_events(listings::events(), Utc::now());
    let cards = |events: &[Event]| -> Vec<EventCard> {
        events.iter().map(|e| event_card(e, locale)).collect()
    };

    let mut context = page_context(&state, locale, &uri, Some(&title), &description);
    context.insert("upcoming", &cards(&upcoming));
    context.insert("past", &cards(&past));

    render_page(&state, "events.html", &context, StatusCode::OK)
}

async fn initiatives(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
    uri: Uri,
) -> Response {
    let translations = state.translations();
    let title = translations.lookup(locale, "initiatives.title");
    let description = translations.lookup(locale, "initiatives.description");

    let cards: Vec<InitiativeCard> = listings::initiatives()
        .iter()
        .map(|i| initiative_card(&state, i, locale))
        .collect();

    let mut context = page_context(&state, locale, &uri, Some(&title), &description);
    context.insert("initiatives", &cards);

    render_page(&state, "initiatives.html", &context, StatusCode::OK)
}
