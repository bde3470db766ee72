//! Catalog consistency validation.
//!
//! Compares every language against the default language. Gaps are not fatal
//! (a missing message renders as its ID), but they are worth surfacing at
//! startup and in CI.

use crate::i18n::localizer::placeholders;
use crate::i18n::{Language, MessageCatalog};

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that will render wrong text for some language
    pub errors: Vec<String>,

    /// Coverage gaps and other non-critical findings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for message catalog coverage.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate every non-default language against the default language.
    ///
    /// This checks that:
    /// - every default-language message exists in each translation (warning)
    /// - translations define no messages unknown to the default language (warning)
    /// - translations keep the default template's placeholders (warning)
    /// - translations introduce no placeholders the default template lacks (error)
    pub fn validate(catalog: &MessageCatalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let base = Language::DEFAULT;
        let base_ids = catalog.message_ids(base);

        for language in catalog.languages() {
            if language == base {
                continue;
            }

            for id in &base_ids {
                let Some(translated) = catalog.message(language, id) else {
                    report
                        .warnings
                        .push(format!("[{}] missing message '{}'", language, id));
                    continue;
                };
                let original = catalog.message(base, id).unwrap_or_default();

                let expected = placeholders(original);
                let actual = placeholders(translated);

                let dropped: Vec<_> = expected.difference(&actual).collect();
                if !dropped.is_empty() {
                    report.warnings.push(format!(
                        "[{}] message '{}' drops placeholders {:?}",
                        language, id, dropped
                    ));
                }

                let unknown: Vec<_> = actual.difference(&expected).collect();
                if !unknown.is_empty() {
                    report.errors.push(format!(
                        "[{}] message '{}' uses placeholders {:?} not defined by '{}'",
                        language, id, unknown, base
                    ));
                }
            }

            for id in catalog.message_ids(language) {
                if !catalog.contains(base, id) {
                    report.warnings.push(format!(
                        "[{}] message '{}' is not defined in '{}'",
                        language, id, base
                    ));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ru: &str, en: &str, kk: &str) -> MessageCatalog {
        MessageCatalog::from_sources([
            (Language::RUSSIAN, ru),
            (Language::ENGLISH, en),
            (Language::KAZAKH, kk),
        ])
        .expect("test catalog should parse")
    }

    #[test]
    fn test_consistent_catalog_is_clean() {
        let catalog = catalog(
            r#"{"api.version": "API версия {{Version}}"}"#,
            r#"{"api.version": "API version {{Version}}"}"#,
            r#"{"api.version": "API нұсқасы {{.Version}}"}"#,
        );
        let report = CatalogValidator::validate(&catalog);
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_missing_message_is_warning() {
        let catalog = catalog(r#"{"welcome": "Добро пожаловать"}"#, r#"{"welcome": "Welcome"}"#, "{}");
        let report = CatalogValidator::validate(&catalog);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("[kk]"));
        assert!(report.warnings[0].contains("welcome"));
    }

    #[test]
    fn test_extra_message_is_warning() {
        let catalog = catalog("{}", r#"{"only.en": "x"}"#, "{}");
        let report = CatalogValidator::validate(&catalog);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("only.en"));
    }

    #[test]
    fn test_dropped_placeholder_is_warning() {
        let catalog = catalog(
            r#"{"v": "версия {{Version}}"}"#,
            r#"{"v": "version"}"#,
            r#"{"v": "нұсқасы {{Version}}"}"#,
        );
        let report = CatalogValidator::validate(&catalog);

        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.contains("drops") && w.contains("Version")));
    }

    #[test]
    fn test_unknown_placeholder_is_error() {
        let catalog = catalog(
            r#"{"v": "версия {{Version}}"}"#,
            r#"{"v": "version {{Verison}}"}"#,
            r#"{"v": "нұсқасы {{Version}}"}"#,
        );
        let report = CatalogValidator::validate(&catalog);

        assert!(report.has_errors());
        assert!(report.errors[0].contains("Verison"));
    }

    #[test]
    fn test_report_default_is_clean() {
        assert!(ValidationReport::default().is_clean());
    }
}
