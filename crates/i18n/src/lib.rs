//! # i18n
//!
//! Static reply tables. Each locale is a JSON object whose nested keys are flattened with `.`
//! (`{"faucet": {"no-address": ".."}}` → `faucet.no-address`). Templates use `{name}`
//! placeholders filled from the arguments passed to [`I18n::t`].
//!
//! Lookup falls back to the default locale, then to the key itself, so a missing translation is
//! visible but never fatal.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::warn;

/// Locales compiled into the binary.
const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("zh", include_str!("../locales/zh.json")),
];

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Locale {locale} is not valid JSON: {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Locale {0} must be a JSON object")]
    NotAnObject(String),

    #[error("Default locale {0} is not available")]
    UnknownDefaultLocale(String),
}

/// Loaded locale tables.
#[derive(Debug, Clone)]
pub struct I18n {
    default_locale: String,
    // BTreeMap keeps `locales()` sorted.
    tables: BTreeMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Loads the embedded `en` and `zh` tables.
    pub fn embedded(default_locale: &str) -> Result<Self, I18nError> {
        Self::from_sources(default_locale, EMBEDDED)
    }

    /// Loads `(locale, json)` pairs. `default_locale` must be one of them.
    pub fn from_sources(default_locale: &str, sources: &[(&str, &str)]) -> Result<Self, I18nError> {
        let mut tables = BTreeMap::new();
        for (locale, json) in sources {
            let value: serde_json::Value =
                serde_json::from_str(json).map_err(|source| I18nError::Parse {
                    locale: locale.to_string(),
                    source,
                })?;
            let serde_json::Value::Object(_) = value else {
                return Err(I18nError::NotAnObject(locale.to_string()));
            };
            let mut table = HashMap::new();
            flatten("", &value, &mut table);
            tables.insert(locale.to_string(), table);
        }
        if !tables.contains_key(default_locale) {
            return Err(I18nError::UnknownDefaultLocale(default_locale.to_string()));
        }
        Ok(Self {
            default_locale: default_locale.to_string(),
            tables,
        })
    }

    /// Available locale codes, sorted.
    pub fn locales(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Looks up `key` in `locale` and fills `{name}` placeholders from `args`.
    pub fn t(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .tables
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.tables
                    .get(&self.default_locale)
                    .and_then(|table| table.get(key))
            });
        match template {
            Some(template) => substitute(template, args),
            None => {
                warn!(locale = locale, key = key, "Missing translation");
                key.to_string()
            }
        }
    }

    /// Picks the reply locale: the user's stored choice, else their client language when we ship
    /// it (`en-US` matches `en`), else the default.
    pub fn negotiate(&self, stored: Option<&str>, client_language: Option<&str>) -> String {
        if let Some(locale) = stored.filter(|l| self.has_locale(l)) {
            return locale.to_string();
        }
        if let Some(code) = client_language {
            let code = code.trim().to_ascii_lowercase();
            if self.has_locale(&code) {
                return code;
            }
            let primary = code.split(['-', '_']).next().unwrap_or_default();
            if self.has_locale(primary) {
                return primary.to_string();
            }
        }
        self.default_locale.clone()
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                flatten(&key, v, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

fn substitute(template: &str, args: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}
