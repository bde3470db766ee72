//! Language type: validated language representation.
//!
//! A `Language` can only be built from the registry or from the built-in
//! constants, so holding one is proof that the code is supported.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "ru", "en", "kk")
    code: &'static str,
}

impl Language {
    /// Russian, the base language.
    pub const RUSSIAN: Language = Language { code: "ru" };

    /// English.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Kazakh.
    pub const KAZAKH: Language = Language { code: "kk" };

    /// The default/base language used whenever nothing else resolves.
    pub const DEFAULT: Language = Language::RUSSIAN;

    /// Create a Language from an exact language code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is supported
    /// * `Err` if the code is unknown
    ///
    /// # Example
    /// ```ignore
    /// let kazakh = Language::from_code("kk")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// All supported languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list()
            .iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(self.code)
    }

    /// English name of the language (e.g., "Kazakh").
    pub fn name(&self) -> &'static str {
        self.config().map_or(self.code, |config| config.name)
    }

    /// Native name of the language (e.g., "Қазақша").
    pub fn native_name(&self) -> &'static str {
        self.config().map_or(self.code, |config| config.native_name)
    }

    /// Check if this is the default/base language.
    pub fn is_default(&self) -> bool {
        *self == Language::DEFAULT
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
