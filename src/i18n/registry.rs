//! Language registry: Single source of truth for all supported languages.
//!
//! The set of languages is fixed at build time. The registry is a lazily
//! initialized singleton behind `OnceLock` and is never mutated afterwards,
//! so it can be read from any number of request handlers without locking.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "ru", "en", "kk")
    pub code: &'static str,

    /// English name of the language (e.g., "Russian", "Kazakh")
    pub name: &'static str,

    /// Native name of the language (e.g., "Русский", "Қазақша")
    pub native_name: &'static str,

    /// Whether this is the default/base language (exactly one is true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: supported_languages(),
        })
    }

    /// Get a language configuration by its exact code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language is supported
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in registry order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The configuration flagged as default, if any.
    pub fn default_config(&self) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.is_default)
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Built-in language configurations.
///
/// Russian is the base language: every persisted entity carries a Russian
/// text column, and it is the fallback for every negotiation.
fn supported_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            is_default: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
        LanguageConfig {
            code: "kk",
            name: "Kazakh",
            native_name: "Қазақша",
            is_default: false,
        },
    ]
}
