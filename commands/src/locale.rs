//! User-facing text.
//!
//! Commands only ever see the [Localize] trait. [Catalog] is an in-memory
//! implementation using `{{name}}` placeholders and `_one` / `_other` plural
//! keys selected by a `count` parameter.

use std::collections::HashMap;

use serde::Deserialize;

/// Shown when Github could not be reached or returned nothing usable.
pub const FETCH_ERROR: &str = "command.github.common.errors.fetch";

/// Shown when the query succeeded but resolved to nothing.
pub const NO_RESULT: &str = "command.github.common.errors.no_result";

/// Shown when Github reports the commit missing. Takes `expression`, `owner` and `repository`.
pub const COMMIT_NOT_FOUND: &str = "command.github.commit.errors.not_found";

/// Footer of the commit embed. Takes `count`.
pub const COMMIT_FILES_COUNT: &str = "command.github.commit.files_count";

const DEFAULT_LOCALE: &str = "en-US";

/// Look up user-facing text by key.
pub trait Localize: Send + Sync {
    /// The text for `key` in `locale`, with `params` substituted.
    fn localize(&self, key: &str, params: &[(&str, String)], locale: &str) -> String;
}

impl<F> Localize for F
where
    F: Fn(&str, &[(&str, String)], &str) -> String + Send + Sync,
{
    fn localize(&self, key: &str, params: &[(&str, String)], locale: &str) -> String {
        self(key, params, locale)
    }
}

/// Templates keyed by locale, then by message key.
///
/// Lookups in an unknown locale fall back to the default locale, and unknown
/// keys are returned as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_locale")]
    default_locale: String,
    locales: HashMap<String, HashMap<String, String>>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    /// An empty catalog whose fallback locale is `default_locale`.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            locales: HashMap::new(),
        }
    }

    /// The built-in English text for every key used by the commands.
    pub fn english() -> Self {
        let mut catalog = Self::new(DEFAULT_LOCALE);
        for (key, template) in [
            (
                FETCH_ERROR,
                "Something went wrong while fetching data from GitHub.",
            ),
            (NO_RESULT, "GitHub did not return a result for this query."),
            (
                COMMIT_NOT_FOUND,
                "Could not find `{{expression}}` in `{{owner}}/{{repository}}`.",
            ),
            ("command.github.commit.files_count_one", "{{count}} file changed"),
            ("command.github.commit.files_count_other", "{{count}} files changed"),
        ] {
            catalog.insert(DEFAULT_LOCALE, key, template);
        }
        catalog
    }

    /// Parse a catalog from JSON: `{"default_locale": "en-US", "locales": {"en-US": {"key": "text"}}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add or replace a template.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Merge `other` into this catalog, preferring `other`'s templates.
    pub fn merge(&mut self, other: Catalog) {
        for (locale, templates) in other.locales {
            self.locales.entry(locale).or_default().extend(templates);
        }
    }

    fn template(&self, key: &str, locale: &str) -> Option<&str> {
        [locale, self.default_locale.as_str()]
            .into_iter()
            .filter_map(|locale| self.locales.get(locale))
            .find_map(|templates| templates.get(key))
            .map(String::as_str)
    }

    fn lookup(&self, key: &str, params: &[(&str, String)], locale: &str) -> Option<&str> {
        let count = params
            .iter()
            .find(|(name, _)| *name == "count")
            .and_then(|(_, value)| value.parse::<i64>().ok());

        if let Some(count) = count {
            let suffix = if count == 1 { "one" } else { "other" };
            if let Some(template) = self.template(&format!("{key}_{suffix}"), locale) {
                return Some(template);
            }
        }

        self.template(key, locale)
    }
}

impl Localize for Catalog {
    fn localize(&self, key: &str, params: &[(&str, String)], locale: &str) -> String {
        let Some(template) = self.lookup(key, params, locale) else {
            tracing::debug!(key, locale, "missing translation");
            return key.to_owned();
        };

        interpolate(template, params)
    }
}

fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let name = &after[..end];
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => text.push_str(value),
            None => text.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    text.push_str(rest);
    text
}
