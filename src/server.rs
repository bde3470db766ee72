//! HTTP surface: router, handlers and localized error responses.

use crate::config::Config;
use crate::i18n::{language_middleware, I18n, Language, RequestLanguage, TemplateVars};
use crate::permissions::{GetPermissionByValue, PermissionDto, PermissionError};
use crate::roles::{GetRoleByValue, RoleDto, RoleError};
use anyhow::{Context, Result};
use axum::{
    extract::{FromRef, Path, State},
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub i18n: I18n,
    pub roles: GetRoleByValue,
    pub permissions: GetPermissionByValue,
    pub config: Arc<Config>,
}

impl FromRef<AppState> for I18n {
    fn from_ref(state: &AppState) -> I18n {
        state.i18n.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1", get(api_info))
        .route("/api/v1/", get(api_info))
        .route("/api/v1/languages", get(list_languages))
        .route("/api/v1/roles/:value", get(get_role))
        .route("/api/v1/permissions/:value", get(get_permission))
        .route("/metrics/i18n", get(i18n_metrics))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.i18n.clone(),
            language_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState) -> Result<()> {
    let address = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on {}", address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}

// ==================== Handlers ====================

async fn health(lang: RequestLanguage) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "health": "healthy",
        "language": lang.language(),
        "message": lang.translate("welcome", None),
    }))
}

async fn api_info(State(state): State<AppState>, lang: RequestLanguage) -> Json<Value> {
    let vars = TemplateVars::new().with("Version", &state.config.app_version);
    Json(json!({
        "language": lang.language(),
        "message": lang.translate("api.version", Some(&vars)),
        "version": state.config.app_version,
    }))
}

#[derive(Debug, Serialize)]
struct LanguageInfo {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    is_default: bool,
}

#[derive(Debug, Serialize)]
struct LanguagesResponse {
    current: Language,
    default: Language,
    languages: Vec<LanguageInfo>,
}

async fn list_languages(lang: RequestLanguage) -> Json<LanguagesResponse> {
    let languages = Language::all()
        .into_iter()
        .map(|language| LanguageInfo {
            code: language.code(),
            name: language.name(),
            native_name: language.native_name(),
            is_default: language.is_default(),
        })
        .collect();

    Json(LanguagesResponse {
        current: lang.language(),
        default: Language::DEFAULT,
        languages,
    })
}

async fn get_role(
    State(state): State<AppState>,
    lang: RequestLanguage,
    Path(value): Path<String>,
) -> Result<Json<RoleDto>, ApiError> {
    state
        .roles
        .execute(&value, lang.language())
        .map(Json)
        .map_err(|e| ApiError::from_role_error(e, &lang))
}

async fn get_permission(
    State(state): State<AppState>,
    lang: RequestLanguage,
    Path(value): Path<String>,
) -> Result<Json<PermissionDto>, ApiError> {
    state
        .permissions
        .execute(&value, lang.language())
        .map(Json)
        .map_err(|e| ApiError::from_permission_error(e, &lang))
}

async fn i18n_metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.i18n.metrics().report())
}

async fn not_found(lang: RequestLanguage, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": lang.translate("error.not_found", None),
            "path": uri.path(),
        })),
    )
}

// ==================== Errors ====================

/// Error returned by handlers, with a message already localized for the
/// request.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn bad_value(lang: &RequestLanguage) -> Self {
        let vars = TemplateVars::new().with("Field", "value");
        Self::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            lang.translate("validation.required", Some(&vars)),
        )
    }

    fn not_found(lang: &RequestLanguage, message_id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", lang.translate(message_id, None))
    }

    fn internal(lang: &RequestLanguage) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            lang.translate("error.internal_server", None),
        )
    }

    fn from_role_error(err: RoleError, lang: &RequestLanguage) -> Self {
        match err {
            RoleError::EmptyValue => Self::bad_value(lang),
            RoleError::NotFound(_) => Self::not_found(lang, "role_use_case.not_found"),
            RoleError::Repository(e) => {
                error!("Role lookup failed: {:#}", e);
                Self::internal(lang)
            }
        }
    }

    fn from_permission_error(err: PermissionError, lang: &RequestLanguage) -> Self {
        match err {
            PermissionError::EmptyValue => Self::bad_value(lang),
            PermissionError::NotFound(_) => Self::not_found(lang, "permission.not_found"),
            PermissionError::Repository(e) => {
                error!("Permission lookup failed: {:#}", e);
                Self::internal(lang)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.error,
                "message": self.message,
            })),
        )
            .into_response()
    }
}
