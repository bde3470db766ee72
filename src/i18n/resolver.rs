//! Language resolution for incoming requests.
//!
//! Resolution order (highest to lowest priority):
//! 1. Explicit override (the `lang` query parameter), if supported
//! 2. `Accept-Language` header, if it names a supported language
//! 3. The default language
//!
//! Resolution is pure and never fails: malformed input falls through to the
//! next rule.

use crate::i18n::Language;
use anyhow::bail;
use std::str::FromStr;

/// How the `Accept-Language` header is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NegotiationStrategy {
    /// Weighted list: tags ordered by q-value, first supported primary subtag wins.
    #[default]
    Weighted,
    /// Compatibility mode: the first two characters of the raw header, verbatim.
    Leading,
}

impl FromStr for NegotiationStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "leading" => Ok(Self::Leading),
            other => bail!(
                "Invalid Accept-Language mode '{}'. Expected 'weighted' or 'leading'",
                other
            ),
        }
    }
}

/// Which rule produced the resolved language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    Override,
    Header,
    Default,
}

/// Pure resolver from request language signals to a supported language.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageResolver {
    strategy: NegotiationStrategy,
}

impl LanguageResolver {
    pub fn new(strategy: NegotiationStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> NegotiationStrategy {
        self.strategy
    }

    /// Resolve the request language.
    ///
    /// The override is trimmed and matched ASCII case-insensitively, so
    /// `?lang=EN` selects English. An unsupported override falls through to
    /// the header.
    pub fn resolve(&self, explicit_override: Option<&str>, accept_language: Option<&str>) -> Language {
        self.resolve_with_source(explicit_override, accept_language).0
    }

    /// Resolve the request language and report which rule matched.
    pub fn resolve_with_source(
        &self,
        explicit_override: Option<&str>,
        accept_language: Option<&str>,
    ) -> (Language, LanguageSource) {
        if let Some(language) = explicit_override.and_then(parse_override) {
            return (language, LanguageSource::Override);
        }

        let negotiated = accept_language
            .filter(|header| !header.trim().is_empty())
            .and_then(|header| match self.strategy {
                NegotiationStrategy::Weighted => negotiate_weighted(header),
                NegotiationStrategy::Leading => negotiate_leading(header),
            });

        match negotiated {
            Some(language) => (language, LanguageSource::Header),
            None => (Language::DEFAULT, LanguageSource::Default),
        }
    }
}

/// Resolve with the default (weighted) strategy.
///
/// Same override normalization as [`LanguageResolver::resolve`]: ` En ` is `en`.
pub fn resolve(explicit_override: Option<&str>, accept_language: Option<&str>) -> Language {
    LanguageResolver::default().resolve(explicit_override, accept_language)
}

fn parse_override(value: &str) -> Option<Language> {
    let code = value.trim().to_ascii_lowercase();
    Language::from_code(&code).ok()
}

fn negotiate_leading(header: &str) -> Option<Language> {
    // `get` returns None for headers shorter than two bytes or split inside a UTF-8 char
    header
        .get(..2)
        .and_then(|code| Language::from_code(code).ok())
}

fn negotiate_weighted(header: &str) -> Option<Language> {
    parse_accept_language(header)
        .into_iter()
        .find_map(|(tag, _)| Language::from_code(&primary_subtag(&tag)).ok())
}

/// Parse an `Accept-Language` value into `(tag, q)` pairs, highest q first.
///
/// Entries with `q=0`, a malformed q-value, an empty tag, or the `*` wildcard
/// are dropped. Ties keep header order.
pub fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut entries: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in parts {
                let Some((name, value)) = param.split_once('=') else {
                    continue;
                };
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?;
                }
            }

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }
            Some((tag.to_string(), quality))
        })
        .collect();

    // Stable sort keeps header order for equal weights
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
}

fn primary_subtag(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
