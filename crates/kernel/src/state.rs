//! Application state shared across all handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::content::{ContentStore, ImageResolver, SanityClient, StaticContentStore};
use crate::locale::{SupportedLocales, Translations};
use crate::middleware::RouteExclusions;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Built once at startup and
/// never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Validated locale set and default.
    locales: SupportedLocales,

    /// Paths the locale guard leaves alone.
    route_exclusions: RouteExclusions,

    /// Per-locale UI strings.
    translations: Translations,

    /// Page templates.
    theme: ThemeEngine,

    /// Post source.
    content: Arc<dyn ContentStore>,

    /// Asset reference → CDN URL.
    images: ImageResolver,

    /// Static asset root.
    static_dir: PathBuf,
}

impl AppState {
    /// Build state from configuration, connecting the configured content store.
    pub fn new(config: &Config) -> Result<Self> {
        let content: Arc<dyn ContentStore> = match &config.sanity {
            Some(sanity) => {
                info!(
                    project = %sanity.project_id,
                    dataset = %sanity.dataset,
                    cdn = sanity.use_cdn,
                    "using remote content store"
                );
                Arc::new(SanityClient::new(sanity).context("failed to create content store client")?)
            }
            None => {
                info!("no content project configured, serving an empty content store");
                Arc::new(StaticContentStore::new())
            }
        };

        Self::with_content_store(config, content)
    }

    /// Build state with an explicit content store.
    pub fn with_content_store(config: &Config, content: Arc<dyn ContentStore>) -> Result<Self> {
        let locales =
            SupportedLocales::from_codes(&config.supported_locales, &config.default_locale)
                .context("invalid locale configuration")?;

        let translations = Translations::builtin(locales.default_locale())
            .context("failed to load translations")?;

        let theme = ThemeEngine::new(config.templates_dir.as_deref())
            .context("failed to load templates")?;

        let images = match &config.sanity {
            Some(sanity) => ImageResolver::new(&sanity.project_id, &sanity.dataset),
            None => ImageResolver::disabled(),
        };

        let route_exclusions = RouteExclusions::new(config.excluded_prefixes.iter().cloned());

        info!(
            locales = ?locales.locales(),
            default = %locales.default_locale(),
            excluded = ?route_exclusions.prefixes(),
            "locale routing configured"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                locales,
                route_exclusions,
                translations,
                theme,
                content,
                images,
                static_dir: config.static_dir.clone(),
            }),
        })
    }

    pub fn locales(&self) -> &SupportedLocales {
        &self.inner.locales
    }

    pub fn route_exclusions(&self) -> &RouteExclusions {
        &self.inner.route_exclusions
    }

    pub fn translations(&self) -> &Translations {
        &self.inner.translations
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    pub fn content(&self) -> &dyn ContentStore {
        self.inner.content.as_ref()
    }

    pub fn images(&self) -> &ImageResolver {
        &self.inner.images
    }

    pub fn static_dir(&self) -> &Path {
        &self.inner.static_dir
    }
}
