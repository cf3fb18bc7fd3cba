//! Accept-Language parsing and locale negotiation.
//!
//! Negotiation walks the client's preferences by weight (highest first,
//! stable for ties) and returns the first supported locale that matches,
//! trying the full tag before its primary subtag. Anything unusable in the
//! header is skipped rather than reported.

use std::cmp::Ordering;

use super::{Locale, SupportedLocales};

/// A single weighted language preference from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    tag: String,
    weight: f32,
}

impl LanguagePreference {
    pub fn new(tag: impl Into<String>, weight: f32) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            weight,
        }
    }

    /// Lowercased BCP 47-style tag (e.g. "fr-ca").
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Quality value in `0.0..=1.0`.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Primary language subtag ("fr-ca" → "fr").
    pub fn primary_subtag(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }
}

/// Parse an Accept-Language header value into preferences, sorted by
/// weight descending (stable sort keeps header order for equal weights).
///
/// Entries with a malformed tag, the `*` wildcard, an unparseable `q`, or
/// `q=0` are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut langs: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }

            let mut segments = part.split(';');
            let tag = segments.next()?.trim();
            if !is_well_formed_tag(tag) {
                return None;
            }

            let mut weight = 1.0_f32;
            for param in segments {
                let param = param.trim();
                if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    let q: f32 = q.trim().parse().ok()?;
                    if !q.is_finite() {
                        return None;
                    }
                    // RFC 7231 §5.3.1: quality values are 0.000–1.000
                    weight = q.clamp(0.0, 1.0);
                }
            }

            if weight <= 0.0 {
                return None;
            }

            Some(LanguagePreference::new(tag, weight))
        })
        .collect();

    sort_by_weight(&mut langs);
    langs
}

/// Pick exactly one supported locale for the given preferences.
///
/// Falls back to the default locale when nothing matches, including when
/// `preferences` is empty.
pub fn negotiate(preferences: &[LanguagePreference], supported: &SupportedLocales) -> Locale {
    let mut ordered: Vec<&LanguagePreference> = preferences
        .iter()
        .filter(|p| p.weight > 0.0 && is_well_formed_tag(&p.tag))
        .collect();
    ordered.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    for pref in ordered {
        // Exact tag match first
        if let Some(locale) = supported.get(&pref.tag) {
            return locale;
        }
        // Then the primary subtag (e.g., "fr-ca" → "fr")
        if let Some(locale) = supported.get(pref.primary_subtag()) {
            return locale;
        }
    }

    supported.default_locale()
}

/// Convenience wrapper: negotiate straight from an optional header value.
pub fn negotiate_header(header: Option<&str>, supported: &SupportedLocales) -> Locale {
    match header {
        Some(value) => negotiate(&parse_accept_language(value), supported),
        None => supported.default_locale(),
    }
}

fn sort_by_weight(langs: &mut [LanguagePreference]) {
    langs.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
}

/// Syntactic check for a language tag: a 1–8 letter primary subtag followed
/// by hyphen-separated 1–8 character alphanumeric subtags.
fn is_well_formed_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');

    match parts.next() {
        Some(primary)
            if (1..=8).contains(&primary.len())
                && primary.bytes().all(|b| b.is_ascii_alphabetic()) => {}
        _ => return false,
    }

    parts.all(|sub| (1..=8).contains(&sub.len()) && sub.bytes().all(|b| b.is_ascii_alphanumeric()))
}
