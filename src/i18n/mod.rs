//! Internationalization (i18n) module: language negotiation and localized content.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages
//! - `language`: Type-safe `Language` validated against the registry
//! - `catalog`: Message templates loaded once from `<code>.json` locale files
//! - `resolver`: Pure precedence rules from request signals to a `Language`
//! - `localizer`: Language-bound lookup with `{{Name}}` substitution
//! - `middleware`: Per-request binding for axum (`RequestLanguage`)
//! - `field`: Base-language fallback for multi-column entity text
//! - `validator`: Catalog coverage and placeholder checks
//! - `metrics`: Negotiation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{MessageCatalog, Language, TemplateVars};
//!
//! let catalog = Arc::new(MessageCatalog::load("locales")?);
//! let localizer = catalog.localizer(Language::ENGLISH);
//! let vars = TemplateVars::new().with("Version", "1.0.0");
//! assert_eq!(localizer.translate("api.version", Some(&vars)), "API version 1.0.0");
//! ```

mod catalog;
mod field;
mod language;
mod localizer;
mod metrics;
mod middleware;
mod registry;
mod resolver;
mod validator;

pub use catalog::{CatalogError, MessageCatalog};
pub use field::{localize, LocalizedText};
pub use language::Language;
pub use localizer::{placeholders, render_template, Localizer, TemplateVars};
pub use metrics::{MetricsReport, NegotiationMetrics};
pub use middleware::{language_middleware, I18n, RequestLanguage};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::{
    parse_accept_language, resolve, LanguageResolver, LanguageSource, NegotiationStrategy,
};
pub use validator::{CatalogValidator, ValidationReport};
