//! Theme engine with Tera templates.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::routes::helpers::html_escape;

/// Templates compiled into the binary.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    (
        "partials/header.html",
        include_str!("../../templates/partials/header.html"),
    ),
    (
        "partials/footer.html",
        include_str!("../../templates/partials/footer.html"),
    ),
    (
        "partials/post_card.html",
        include_str!("../../templates/partials/post_card.html"),
    ),
    (
        "partials/event_card.html",
        include_str!("../../templates/partials/event_card.html"),
    ),
    ("home.html", include_str!("../../templates/home.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("contact.html", include_str!("../../templates/contact.html")),
    ("events.html", include_str!("../../templates/events.html")),
    (
        "initiatives.html",
        include_str!("../../templates/initiatives.html"),
    ),
    ("blog_list.html", include_str!("../../templates/blog_list.html")),
    ("blog_post.html", include_str!("../../templates/blog_post.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine from the built-in templates.
    ///
    /// When `override_dir` is given, any `*.html` file under it replaces the
    /// built-in template with the same relative name. Overrides may extend
    /// or include built-in templates.
    pub fn new(override_dir: Option<&Path>) -> Result<Self> {
        let mut templates: Vec<(String, String)> = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();

        if let Some(dir) = override_dir {
            let mut overrides = Vec::new();
            collect_templates(dir, dir, &mut overrides)
                .with_context(|| format!("failed to read templates from {}", dir.display()))?;
            debug!(dir = %dir.display(), count = overrides.len(), "loaded template overrides");
            // Later entries replace earlier ones with the same name
            templates.extend(overrides);
        }

        let mut tera = Tera::default();
        // Same escaping as rendered post bodies; leaves `/` in URLs readable
        tera.set_escape_fn(html_escape);
        Self::register_filters(&mut tera);
        tera.add_raw_templates(templates)
            .context("failed to parse templates")?;

        debug!(count = tera.get_template_names().count(), "loaded templates");

        Ok(Self { tera })
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Prefix a site path with the page locale: `"/blog" | localize(locale=locale)`
        tera.register_filter(
            "localize",
            |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("localize", "value", String, value);
                let locale = args
                    .get("locale")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| tera::Error::msg("localize filter requires `locale`"))?;

                let localized = if path.is_empty() || path == "/" {
                    format!("/{locale}/")
                } else if path.starts_with('/') {
                    format!("/{locale}{path}")
                } else {
                    format!("/{locale}/{path}")
                };
                Ok(tera::Value::String(localized))
            },
        );
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Render a template by name.
    pub fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("failed to render template {template}"))
    }

    /// Whether a template with this name is loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Recursively gather `*.html` files as (name relative to `root`, source).
fn collect_templates(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_templates(root, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let name = path
                .strip_prefix(root)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            out.push((name, source));
        }
    }
    Ok(())
}
