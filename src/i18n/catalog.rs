//! Message catalog: every translatable UI string for every supported language.
//!
//! The catalog is built once at startup from one JSON file per language and
//! is read-only afterwards. It is shared between requests as
//! `Arc<MessageCatalog>`; reads need no synchronization.
//!
//! # File format
//!
//! Each `<code>.json` file is a JSON object. Supported entry shapes:
//!
//! ```json
//! {
//!   "welcome": "Welcome",
//!   "api.version": { "description": "Shown on the API root", "other": "API version {{Version}}" },
//!   "error": { "not_found": "Resource not found" }
//! }
//! ```
//!
//! Nested objects without a string `other` are flattened into dotted IDs
//! (`error.not_found`).

use crate::i18n::localizer::{render_template, Localizer, TemplateVars};
use crate::i18n::Language;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Failure to build the catalog. Always fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read locale file {} for language '{language}'", .path.display())]
    Read {
        language: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locale file {} for language '{language}'", .path.display())]
    Parse {
        language: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("locale file {} for language '{language}' must contain a JSON object", .path.display())]
    NotAnObject { language: &'static str, path: PathBuf },

    #[error(
        "locale file {} for language '{language}' has an invalid entry '{key}': expected a string or a message object",
        .path.display()
    )]
    InvalidEntry {
        language: &'static str,
        path: PathBuf,
        key: String,
    },
}

/// Immutable mapping `language -> (message id -> template)`.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    messages: HashMap<Language, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Load the locale file of every supported language from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::load_languages(dir, &Language::all())
    }

    /// Load `<dir>/<code>.json` for each of `languages`.
    ///
    /// Every listed language is required: the first read or parse failure is
    /// returned and no catalog is produced.
    pub fn load_languages(
        dir: impl AsRef<Path>,
        languages: &[Language],
    ) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut messages = HashMap::with_capacity(languages.len());

        for &language in languages {
            let path = dir.join(format!("{}.json", language.code()));
            let data = fs::read(&path).map_err(|source| CatalogError::Read {
                language: language.code(),
                path: path.clone(),
                source,
            })?;

            let entries = parse_messages(language, &path, &data)?;
            info!(
                "Loaded {} messages for '{}' from {}",
                entries.len(),
                language,
                path.display()
            );
            messages.insert(language, entries);
        }

        Ok(Self { messages })
    }

    /// Build a catalog from in-memory JSON sources, one per language.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (Language, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let mut messages = HashMap::new();
        for (language, source) in sources {
            let path = PathBuf::from(format!("{}.json", language.code()));
            let entries = parse_messages(language, &path, source.as_bytes())?;
            messages.insert(language, entries);
        }
        Ok(Self { messages })
    }

    /// Raw template for `message_id` in `language`.
    pub fn message(&self, language: Language, message_id: &str) -> Option<&str> {
        self.messages
            .get(&language)
            .and_then(|entries| entries.get(message_id))
            .map(String::as_str)
    }

    /// Check if `language` defines `message_id`.
    pub fn contains(&self, language: Language, message_id: &str) -> bool {
        self.message(language, message_id).is_some()
    }

    /// Languages present in the catalog, in registry order.
    pub fn languages(&self) -> Vec<Language> {
        Language::all()
            .into_iter()
            .filter(|language| self.messages.contains_key(language))
            .collect()
    }

    /// Message IDs defined for `language`, sorted.
    pub fn message_ids(&self, language: Language) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .messages
            .get(&language)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Number of messages defined for `language`.
    pub fn len(&self, language: Language) -> usize {
        self.messages.get(&language).map_or(0, HashMap::len)
    }

    /// Check if the catalog holds no languages at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up `message_id` in `language` and substitute `vars`.
    ///
    /// A missing ID yields the ID itself. Other languages are never consulted.
    pub fn translate(
        &self,
        language: Language,
        message_id: &str,
        vars: Option<&TemplateVars>,
    ) -> String {
        match self.message(language, message_id) {
            Some(template) => render_template(template, vars),
            None => {
                debug!("Missing message '{}' for language '{}'", message_id, language);
                message_id.to_string()
            }
        }
    }

    /// Translate using a raw language code; unsupported codes use the default language.
    pub fn translate_code(
        &self,
        code: &str,
        message_id: &str,
        vars: Option<&TemplateVars>,
    ) -> String {
        let language = Language::from_code(code).unwrap_or(Language::DEFAULT);
        self.translate(language, message_id, vars)
    }

    /// Translate in the default language.
    pub fn translate_default(&self, message_id: &str, vars: Option<&TemplateVars>) -> String {
        self.translate(Language::DEFAULT, message_id, vars)
    }

    /// Localizer bound to `language`.
    pub fn localizer(self: &Arc<Self>, language: Language) -> Localizer {
        Localizer::new(Arc::clone(self), language)
    }

    /// Localizer for a raw code; unsupported codes bind the default language.
    pub fn localizer_for_code(self: &Arc<Self>, code: &str) -> Localizer {
        self.localizer(Language::from_code(code).unwrap_or(Language::DEFAULT))
    }
}

fn parse_messages(
    language: Language,
    path: &Path,
    data: &[u8],
) -> Result<HashMap<String, String>, CatalogError> {
    let root: Value = serde_json::from_slice(data).map_err(|source| CatalogError::Parse {
        language: language.code(),
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(object) = root else {
        return Err(CatalogError::NotAnObject {
            language: language.code(),
            path: path.to_path_buf(),
        });
    };

    let mut entries = HashMap::new();
    collect_entries(language, path, None, &object, &mut entries)?;
    Ok(entries)
}

/// Keys that make an object a go-i18n message rather than a group.
const MESSAGE_KEYS: [&str; 11] = [
    "id",
    "description",
    "hash",
    "leftdelim",
    "rightdelim",
    "zero",
    "one",
    "two",
    "few",
    "many",
    "other",
];

/// An object is a message when any reserved key holds a string.
fn is_message_object(object: &Map<String, Value>) -> bool {
    MESSAGE_KEYS
        .iter()
        .any(|key| matches!(object.get(*key), Some(Value::String(_))))
}

fn collect_entries(
    language: Language,
    path: &Path,
    prefix: Option<&str>,
    object: &Map<String, Value>,
    entries: &mut HashMap<String, String>,
) -> Result<(), CatalogError> {
    for (key, value) in object {
        let id = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            Value::String(template) => {
                entries.insert(id, template.clone());
            }
            Value::Object(inner) if is_message_object(inner) => match inner.get("other") {
                // plural categories other than `other` are ignored
                Some(Value::String(template)) => {
                    entries.insert(id, template.clone());
                }
                _ => {
                    return Err(CatalogError::InvalidEntry {
                        language: language.code(),
                        path: path.to_path_buf(),
                        key: id,
                    })
                }
            },
            Value::Object(inner) => collect_entries(language, path, Some(&id), inner, entries)?,
            _ => {
                return Err(CatalogError::InvalidEntry {
                    language: language.code(),
                    path: path.to_path_buf(),
                    key: id,
                })
            }
        }
    }
    Ok(())
}
