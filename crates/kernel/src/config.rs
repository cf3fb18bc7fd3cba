//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::content::SanityConfig;
use crate::middleware::language::DEFAULT_EXCLUDED_PREFIXES;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Supported locale codes, in declaration order (default: en,fr,ar).
    pub supported_locales: Vec<String>,

    /// Locale used when negotiation finds no match (default: ar).
    pub default_locale: String,

    /// Path prefixes the locale guard never touches.
    pub excluded_prefixes: Vec<String>,

    /// Path to static assets (default: ./static).
    pub static_dir: PathBuf,

    /// Optional directory of template overrides.
    pub templates_dir: Option<PathBuf>,

    /// Content store project. When None, an empty in-memory store is used.
    pub sanity: Option<SanityConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            supported_locales: vec!["en".to_string(), "fr".to_string(), "ar".to_string()],
            default_locale: "ar".to_string(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            static_dir: PathBuf::from("./static"),
            templates_dir: None,
            sanity: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let supported_locales = var("SUPPORTED_LOCALES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.supported_locales);

        let default_locale = var("DEFAULT_LOCALE")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.default_locale);

        let excluded_prefixes = var("LOCALE_EXCLUDED_PREFIXES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.excluded_prefixes);

        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let templates_dir = var("TEMPLATES_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let sanity = match var("SANITY_PROJECT_ID").filter(|v| !v.trim().is_empty()) {
            Some(project_id) => {
                let use_cdn = var("SANITY_USE_CDN")
                    .unwrap_or_else(|| "true".to_string())
                    .trim()
                    .parse()
                    .context("SANITY_USE_CDN must be true or false")?;

                Some(SanityConfig {
                    project_id: project_id.trim().to_string(),
                    dataset: var("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
                    api_version: var("SANITY_API_VERSION")
                        .unwrap_or_else(|| "2024-01-01".to_string()),
                    token: var("SANITY_TOKEN").filter(|t| !t.is_empty()),
                    use_cdn,
                })
            }
            None => None,
        };

        Ok(Self {
            port,
            supported_locales,
            default_locale,
            excluded_prefixes,
            static_dir,
            templates_dir,
            sanity,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
