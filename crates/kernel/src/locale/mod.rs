//! Supported locales and their metadata.
//!
//! The supported set is validated once at startup and frozen for the
//! process lifetime. Everything per-request (negotiation, prefix
//! classification) borrows it immutably.

pub mod format;
pub mod negotiate;
pub mod strings;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

pub use negotiate::{LanguagePreference, negotiate, parse_accept_language};
pub use strings::Translations;

/// A site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Fr,
    Ar,
}

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Locale {
    /// Every locale the site knows how to render.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Ar];

    /// Order used by the language switcher.
    pub const SWITCHER_ORDER: [Locale; 3] = [Locale::Ar, Locale::Fr, Locale::En];

    /// Lowercase code used in URLs and `lang` attributes.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Ar => "ar",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Locale::Ar => Direction::Rtl,
            Locale::En | Locale::Fr => Direction::Ltr,
        }
    }

    /// Name of the language in itself, for the switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
            Locale::Ar => "العربية",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Error returned when parsing an unknown locale code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale code '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Case-sensitive: URL prefixes and configuration use lowercase codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Startup-time locale misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleConfigError {
    #[error("supported locale set is empty")]
    Empty,

    #[error(transparent)]
    Unknown(#[from] UnknownLocale),

    #[error("locale '{0}' is listed more than once")]
    Duplicate(Locale),

    #[error("default locale '{0}' is not in the supported set")]
    DefaultNotSupported(Locale),
}

/// The ordered, validated set of supported locales plus the default.
///
/// Invariants: non-empty, no duplicates, `default` is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    locales: Vec<Locale>,
    default: Locale,
}

impl SupportedLocales {
    /// Validate a supported set and default.
    pub fn new(locales: Vec<Locale>, default: Locale) -> Result<Self, LocaleConfigError> {
        if locales.is_empty() {
            return Err(LocaleConfigError::Empty);
        }

        for (i, locale) in locales.iter().enumerate() {
            if locales[..i].contains(locale) {
                return Err(LocaleConfigError::Duplicate(*locale));
            }
        }

        if !locales.contains(&default) {
            return Err(LocaleConfigError::DefaultNotSupported(default));
        }

        Ok(Self { locales, default })
    }

    /// Parse and validate codes as they appear in configuration.
    pub fn from_codes<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self, LocaleConfigError> {
        let locales = codes
            .iter()
            .map(|c| c.as_ref().trim().parse::<Locale>())
            .collect::<Result<Vec<_>, _>>()?;
        let default = default.trim().parse::<Locale>()?;
        Self::new(locales, default)
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    /// Look up a supported locale by its code.
    pub fn get(&self, code: &str) -> Option<Locale> {
        self.locales.iter().copied().find(|l| l.code() == code)
    }

    /// Supported locales in language-switcher order.
    pub fn switcher_order(&self) -> impl Iterator<Item = Locale> + '_ {
        Locale::SWITCHER_ORDER
            .into_iter()
            .filter(|l| self.contains(*l))
    }
}

impl Default for SupportedLocales {
    /// `{en, fr, ar}` with `ar` as the default.
    fn default() -> Self {
        Self {
            locales: Locale::ALL.to_vec(),
            default: Locale::Ar,
        }
    }
}
