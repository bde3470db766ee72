//! Per-request language binding for axum.
//!
//! `language_middleware` resolves the language once per request from the
//! `lang` query parameter and the `Accept-Language` header, and stores a
//! [`RequestLanguage`] in the request extensions. Handlers take
//! `RequestLanguage` as an extractor.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(middleware::from_fn_with_state(i18n.clone(), language_middleware))
//!     .with_state(state);
//!
//! async fn handler(lang: RequestLanguage) -> String {
//!     lang.translate("welcome", None)
//! }
//! ```

use crate::i18n::{
    Language, LanguageResolver, Localizer, MessageCatalog, NegotiationMetrics, TemplateVars,
};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query, Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
        request::Parts,
        HeaderValue, Uri,
    },
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Shared localization state: catalog, resolver and negotiation counters.
#[derive(Clone)]
pub struct I18n {
    catalog: Arc<MessageCatalog>,
    resolver: LanguageResolver,
    metrics: Arc<NegotiationMetrics>,
}

impl I18n {
    pub fn new(catalog: Arc<MessageCatalog>, resolver: LanguageResolver) -> Self {
        Self {
            catalog,
            resolver,
            metrics: Arc::new(NegotiationMetrics::new()),
        }
    }

    pub fn catalog(&self) -> &Arc<MessageCatalog> {
        &self.catalog
    }

    pub fn resolver(&self) -> LanguageResolver {
        self.resolver
    }

    pub fn metrics(&self) -> &NegotiationMetrics {
        &self.metrics
    }

    /// Resolve the request language and bind a localizer to it.
    pub fn bind(
        &self,
        explicit_override: Option<&str>,
        accept_language: Option<&str>,
    ) -> RequestLanguage {
        let (language, source) = self
            .resolver
            .resolve_with_source(explicit_override, accept_language);
        self.metrics.record(source);
        debug!("Resolved request language '{}' from {:?}", language, source);

        RequestLanguage::new(self.catalog.localizer(language))
    }

    /// Binding for the default language.
    pub fn default_binding(&self) -> RequestLanguage {
        RequestLanguage::new(self.catalog.localizer(Language::DEFAULT))
    }
}

/// The resolved language of one request and its bound localizer.
///
/// Created by [`language_middleware`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RequestLanguage {
    language: Language,
    localizer: Localizer,
}

impl RequestLanguage {
    fn new(localizer: Localizer) -> Self {
        Self {
            language: localizer.language(),
            localizer,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Shorthand for `self.localizer().translate(..)`.
    pub fn translate(&self, message_id: &str, vars: Option<&TemplateVars>) -> String {
        self.localizer.translate(message_id, vars)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestLanguage
where
    I18n: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(binding) = parts.extensions.get::<RequestLanguage>() {
            return Ok(binding.clone());
        }

        debug!("No language binding on request, using default language");
        Ok(I18n::from_ref(state).default_binding())
    }
}

/// First `lang` value in the query string. Later repeats are ignored.
fn lang_override(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "lang").then_some(value))
}

/// Resolve the request language and attach it to the request.
///
/// Never rejects a request. Sets `Content-Language` on the response.
pub async fn language_middleware(
    State(i18n): State<I18n>,
    mut request: Request,
    next: Next,
) -> Response {
    let explicit_override = lang_override(request.uri());

    let binding = {
        let accept_language = request
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        i18n.bind(explicit_override.as_deref(), accept_language)
    };
    let language = binding.language();
    request.extensions_mut().insert(binding);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CONTENT_LANGUAGE, HeaderValue::from_static(language.code()));
    response
}
