//! HTTP middleware components.
//!
//! Provides the locale prefix guard that fronts every page route.

pub mod language;

pub use language::{
    GuardDecision, PathClassification, ResolvedLocale, RouteExclusions, classify_path, decide,
    redirect_target, require_locale_prefix,
};
