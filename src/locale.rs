//! Localized message templates.
//!
//! Numeric messages use a single `%d` placeholder so one localized template
//! covers every numeric variant of a phrase ("%d days ago" serves "2 days
//! ago", "6 days ago", and so on).

use std::collections::HashMap;

/// Lookup table mapping message templates to their localized forms.
///
/// Lookups for keys without an entry fall through to the key itself, so the
/// empty catalog behaves as the built-in English one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    /// The built-in English catalog.
    pub fn english() -> Self {
        Self::default()
    }

    /// Picks a catalog for the current system locale.
    ///
    /// Only English strings are bundled today, so every locale resolves to
    /// the identity catalog; the detection point exists so translations can
    /// slot in without touching callers.
    pub fn for_system_locale() -> Self {
        if let Some(locale) = sys_locale::get_locale() {
            tracing::debug!("system locale: {locale}");
        }
        Self::english()
    }

    /// Builds a catalog from explicit template/translation pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            strings: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the localized form of a template, or the template itself.
    pub fn localize<'a>(&'a self, template: &'a str) -> &'a str {
        self.strings.get(template).map_or(template, String::as_str)
    }

    /// Localizes a template and substitutes its numeric argument, if any.
    pub fn format(&self, template: &str, count: Option<i64>) -> String {
        let localized = self.localize(template);
        match count {
            Some(n) => localized.replace("%d", &n.to_string()),
            None => localized.to_string(),
        }
    }
}
