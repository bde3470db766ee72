//! Field-level fallback for persisted multi-language content.
//!
//! Entities store one mandatory base-language column and optional columns for
//! the other languages. This is independent of the message catalog: a missing
//! column falls back to the base text, never to a message ID.

use crate::i18n::Language;
use std::collections::HashMap;

/// Pick the text for `resolved`, falling back to `base_text`.
///
/// The base text is returned when `resolved` is the base language, or when
/// the per-language value is `None` or has no entry at all.
pub fn localize<'a>(
    base_text: &'a str,
    per_language: &'a HashMap<Language, Option<String>>,
    resolved: Language,
) -> &'a str {
    if resolved.is_default() {
        return base_text;
    }

    per_language
        .get(&resolved)
        .and_then(Option::as_deref)
        .unwrap_or(base_text)
}

/// A multi-language text value as stored on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    base: String,
    translations: HashMap<Language, Option<String>>,
}

impl LocalizedText {
    /// Text with only the base-language value.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            translations: HashMap::new(),
        }
    }

    /// Set the column for `language`. `None` models a NULL column.
    pub fn with_translation(mut self, language: Language, text: Option<impl Into<String>>) -> Self {
        self.translations.insert(language, text.map(Into::into));
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn translations(&self) -> &HashMap<Language, Option<String>> {
        &self.translations
    }

    /// The value shown to a client whose request resolved to `language`.
    pub fn resolve(&self, language: Language) -> &str {
        localize(&self.base, &self.translations, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_title() -> HashMap<Language, Option<String>> {
        HashMap::from([
            (Language::ENGLISH, None),
            (Language::KAZAKH, Some("Әкімші".to_string())),
        ])
    }

    #[test]
    fn test_null_translation_falls_back_to_base() {
        assert_eq!(localize("Admin", &admin_title(), Language::ENGLISH), "Admin");
    }

    #[test]
    fn test_present_translation_is_used() {
        assert_eq!(localize("Admin", &admin_title(), Language::KAZAKH), "Әкімші");
    }

    #[test]
    fn test_base_language_always_uses_base() {
        let per_language = HashMap::from([(Language::RUSSIAN, Some("ignored".to_string()))]);
        assert_eq!(
            localize("Администратор", &per_language, Language::RUSSIAN),
            "Администратор"
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_base() {
        let per_language = HashMap::new();
        assert_eq!(localize("Admin", &per_language, Language::KAZAKH), "Admin");
    }

    #[test]
    fn test_empty_translation_is_a_value() {
        let per_language = HashMap::from([(Language::ENGLISH, Some(String::new()))]);
        assert_eq!(localize("Admin", &per_language, Language::ENGLISH), "");
    }

    #[test]
    fn test_localized_text_resolve() {
        let title = LocalizedText::new("Модератор")
            .with_translation(Language::ENGLISH, Some("Moderator"))
            .with_translation(Language::KAZAKH, None::<String>);

        assert_eq!(title.resolve(Language::RUSSIAN), "Модератор");
        assert_eq!(title.resolve(Language::ENGLISH), "Moderator");
        assert_eq!(title.resolve(Language::KAZAKH), "Модератор");
        assert_eq!(title.base(), "Модератор");
        assert_eq!(title.translations().len(), 2);
    }
}
