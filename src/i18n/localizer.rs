//! Language-bound message lookup with template substitution.
//!
//! Templates use `{{Name}}` placeholders. The Go-template spelling
//! `{{.Name}}` and inner whitespace (`{{ Name }}`) are accepted too, so
//! locale files written for go-i18n render unchanged.

use crate::i18n::{Language, MessageCatalog};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
    })
}

/// Named values substituted into message templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style. Any `Display` value is accepted.
    ///
    /// ```ignore
    /// let vars = TemplateVars::new().with("Field", "password").with("Min", 8);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Substitute every placeholder that has a matching variable.
///
/// Placeholders without a variable are left verbatim. Substituted values are
/// not expanded again.
pub fn render_template(template: &str, vars: Option<&TemplateVars>) -> String {
    let Some(vars) = vars.filter(|vars| !vars.is_empty()) else {
        return template.to_string();
    };
    if !template.contains("{{") {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all placeholders in `template`.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Message lookup bound to one language.
///
/// Cheap to clone: holds the shared catalog and a language code.
#[derive(Clone)]
pub struct Localizer {
    catalog: Arc<MessageCatalog>,
    language: Language,
}

impl Localizer {
    pub fn new(catalog: Arc<MessageCatalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    /// The language this localizer is bound to.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `message_id`, substituting `vars`.
    ///
    /// Returns the message ID itself when the bound language does not define
    /// it. There is no fallback to other languages.
    pub fn translate(&self, message_id: &str, vars: Option<&TemplateVars>) -> String {
        self.catalog.translate(self.language, message_id, vars)
    }

    /// Translate `message_id`, or return `default` when it is not defined.
    pub fn translate_or(
        &self,
        message_id: &str,
        default: &str,
        vars: Option<&TemplateVars>,
    ) -> String {
        match self.catalog.message(self.language, message_id) {
            Some(template) => render_template(template, vars),
            None => default.to_string(),
        }
    }
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
