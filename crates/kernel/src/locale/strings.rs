//! Interface string tables.
//!
//! One TOML table per locale, compiled into the binary. Templates receive
//! the whole table for the page locale as `t`; Rust code resolves dotted
//! keys through [`Translations::lookup`].

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::info;

use super::Locale;

const EN: &str = include_str!("../../translations/en.toml");
const FR: &str = include_str!("../../translations/fr.toml");
const AR: &str = include_str!("../../translations/ar.toml");

/// Parsed translation tables for every locale.
#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<Locale, toml::Table>,
    fallback: Locale,
}

impl Translations {
    /// Parse the built-in tables. Missing keys fall back to `fallback`.
    pub fn builtin(fallback: Locale) -> Result<Self> {
        let mut tables = HashMap::new();
        for (locale, source) in [(Locale::En, EN), (Locale::Fr, FR), (Locale::Ar, AR)] {
            let table: toml::Table = toml::from_str(source)
                .with_context(|| format!("failed to parse {locale} translations"))?;
            tables.insert(locale, table);
        }

        info!(locales = tables.len(), fallback = %fallback, "loaded translation tables");
        Ok(Self { tables, fallback })
    }

    /// The full table for a locale, for template contexts.
    pub fn table(&self, locale: Locale) -> Option<&toml::Table> {
        self.tables.get(&locale)
    }

    /// Resolve a dotted key (e.g. `"nav.home"`).
    ///
    /// Falls back to the fallback locale, then to the key itself.
    pub fn lookup(&self, locale: Locale, key: &str) -> String {
        self.find(locale, key)
            .or_else(|| self.find(self.fallback, key))
            .unwrap_or(key)
            .to_string()
    }

    fn find(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut value = self.tables.get(&locale)?.get(first)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        value.as_str()
    }

    /// Every dotted leaf key defined for a locale, sorted.
    pub fn keys(&self, locale: Locale) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(table) = self.tables.get(&locale) {
            collect_keys(table, "", &mut keys);
        }
        keys.sort();
        keys
    }
}

fn collect_keys(table: &toml::Table, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::Table(inner) => collect_keys(inner, &key, out),
            _ => out.push(key),
        }
    }
}
