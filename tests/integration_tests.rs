//! Integration tests for the localized API
//!
//! These tests drive the full router (language middleware, handlers and
//! fallback) against the bundled locale files in `locales/`.

use axum::{
    body::Body,
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
        Request, StatusCode,
    },
    Router,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use localized_api::{
    config::Config,
    i18n::{
        CatalogError, CatalogValidator, I18n, Language, LanguageResolver, LocalizedText,
        MessageCatalog, NegotiationStrategy,
    },
    permissions::{GetPermissionByValue, InMemoryPermissionRepository},
    roles::{GetRoleByValue, InMemoryRoleRepository, Role},
    server::{create_router, AppState},
};

// ==================== Test Helpers ====================

fn locales_dir() -> String {
    format!("{}/locales", env!("CARGO_MANIFEST_DIR"))
}

fn create_test_config(negotiation: NegotiationStrategy) -> Config {
    Config {
        app_name: "localized-api".to_string(),
        app_version: "2.0.0".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        locales_dir: locales_dir(),
        negotiation,
    }
}

fn create_state(repo: InMemoryRoleRepository, negotiation: NegotiationStrategy) -> AppState {
    let config = create_test_config(negotiation);
    let catalog = MessageCatalog::load(&config.locales_dir).expect("bundled locales should load");

    AppState {
        i18n: I18n::new(Arc::new(catalog), LanguageResolver::new(negotiation)),
        roles: GetRoleByValue::new(Arc::new(repo)),
        permissions: GetPermissionByValue::new(Arc::new(InMemoryPermissionRepository::seeded())),
        config: Arc::new(config),
    }
}

fn create_app() -> Router {
    create_router(create_state(
        InMemoryRoleRepository::seeded(),
        NegotiationStrategy::Weighted,
    ))
}

struct TestResponse {
    status: StatusCode,
    content_language: Option<String>,
    body: Value,
}

async fn get(app: Router, uri: &str, accept_language: Option<&str>) -> TestResponse {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        request = request.header(ACCEPT_LANGUAGE, value);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_language = response
        .headers()
        .get(CONTENT_LANGUAGE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_language,
        body: serde_json::from_slice(&bytes).expect("response should be JSON"),
    }
}

// ==================== Catalog Loading Tests ====================

#[test]
fn test_bundled_locales_are_consistent() {
    let catalog = MessageCatalog::load(locales_dir()).unwrap();
    let report = CatalogValidator::validate(&catalog);

    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(catalog.message(Language::ENGLISH, "permission.not_found"), Some("Permission not found"));
}

#[test]
fn test_missing_locale_file_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("ru.json"), r#"{"welcome": "Добро пожаловать"}"#).unwrap();
    std::fs::write(temp_dir.path().join("en.json"), r#"{"welcome": "Welcome"}"#).unwrap();

    match MessageCatalog::load(temp_dir.path()) {
        Err(CatalogError::Read { language, .. }) => assert_eq!(language, "kk"),
        other => panic!("expected read error, got {:?}", other),
    }
}

// ==================== Negotiation Tests ====================

#[tokio::test]
async fn test_health_uses_default_language() {
    let response = get(create_app(), "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["health"], "healthy");
    assert_eq!(response.body["language"], "ru");
    assert_eq!(response.body["message"], "Добро пожаловать");
    assert_eq!(response.content_language.as_deref(), Some("ru"));
}

#[tokio::test]
async fn test_query_override_beats_header() {
    let response = get(create_app(), "/health?lang=kk", Some("en-US,en;q=0.9")).await;

    assert_eq!(response.body["language"], "kk");
    assert_eq!(response.body["message"], "Қош келдіңіз");
    assert_eq!(response.content_language.as_deref(), Some("kk"));
}

#[tokio::test]
async fn test_override_is_case_insensitive() {
    let response = get(create_app(), "/health?lang=EN", None).await;
    assert_eq!(response.body["language"], "en");
}

#[tokio::test]
async fn test_unsupported_override_falls_through_to_header() {
    let response = get(create_app(), "/health?lang=de", Some("en")).await;
    assert_eq!(response.body["message"], "Welcome");
}

#[tokio::test]
async fn test_weighted_header_picks_first_supported() {
    let response = get(create_app(), "/health", Some("fr-FR,kk;q=0.8,en;q=0.5")).await;

    assert_eq!(response.body["language"], "kk");
    assert_eq!(response.content_language.as_deref(), Some("kk"));
}

#[tokio::test]
async fn test_leading_mode_only_reads_first_two_chars() {
    let app = create_router(create_state(
        InMemoryRoleRepository::seeded(),
        NegotiationStrategy::Leading,
    ));
    let response = get(app, "/health", Some("fr-FR,kk;q=0.8")).await;

    assert_eq!(response.body["language"], "ru");
}

// ==================== API Tests ====================

#[tokio::test]
async fn test_api_version_substitution() {
    let response = get(create_app(), "/api/v1", Some("en")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "API version 2.0.0");
    assert_eq!(response.body["version"], "2.0.0");

    let response = get(create_app(), "/api/v1/", None).await;
    assert_eq!(response.body["message"], "API версия 2.0.0");
}

#[tokio::test]
async fn test_languages_list() {
    let response = get(create_app(), "/api/v1/languages?lang=en", None).await;

    assert_eq!(response.body["current"], "en");
    assert_eq!(response.body["default"], "ru");

    let languages = response.body["languages"].as_array().unwrap();
    let codes: Vec<&str> = languages.iter().map(|l| l["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["ru", "en", "kk"]);
    assert_eq!(languages[0]["is_default"], true);
    assert_eq!(languages[2]["native_name"], "Қазақша");
}

// ==================== Role Tests ====================

#[tokio::test]
async fn test_role_is_localized_per_request() {
    let app = create_app();

    let kk = get(app.clone(), "/api/v1/roles/admin", Some("kk")).await;
    let en = get(app.clone(), "/api/v1/roles/admin?lang=en", None).await;
    let ru = get(app, "/api/v1/roles/admin", None).await;

    assert_eq!(kk.status, StatusCode::OK);
    assert_eq!(kk.body["title"], "Әкімші");
    assert_eq!(en.body["title"], "Administrator");
    assert_eq!(ru.body["title"], "Администратор");
    assert_eq!(en.body["value"], "admin");
    assert!(en.body.get("deleted_at").is_none());
}

#[tokio::test]
async fn test_role_without_translation_uses_base_text() {
    let now = Utc::now();
    let repo = InMemoryRoleRepository::new(vec![Role {
        id: "r-1".to_string(),
        value: "auditor".to_string(),
        title: LocalizedText::new("Аудитор")
            .with_translation(Language::ENGLISH, Some("Auditor"))
            .with_translation(Language::KAZAKH, None::<String>),
        description: LocalizedText::new("Только чтение"),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }]);
    let app = create_router(create_state(repo, NegotiationStrategy::Weighted));

    let kk = get(app.clone(), "/api/v1/roles/auditor?lang=kk", None).await;
    let en = get(app, "/api/v1/roles/auditor?lang=en", None).await;

    assert_eq!(kk.body["title"], "Аудитор");
    assert_eq!(en.body["title"], "Auditor");
    assert_eq!(en.body["description"], "Только чтение");
}

#[tokio::test]
async fn test_unknown_role_is_localized_404() {
    let response = get(create_app(), "/api/v1/roles/owner", Some("kk")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Рөл табылмады");
    assert_eq!(response.content_language.as_deref(), Some("kk"));
}

#[tokio::test]
async fn test_blank_role_value_is_400() {
    let response = get(create_app(), "/api/v1/roles/%20?lang=en", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Field value is required");
}

// ==================== Permission Tests ====================

#[tokio::test]
async fn test_permission_is_localized_per_request() {
    let app = create_app();

    let kk = get(app.clone(), "/api/v1/permissions/delete", Some("kk-KZ")).await;
    let en = get(app, "/api/v1/permissions/delete?lang=en", None).await;

    assert_eq!(kk.status, StatusCode::OK);
    assert_eq!(kk.body["title"], "Жазбаларды жою");
    assert_eq!(en.body["title"], "Delete All");
    assert_eq!(en.body["value"], "delete");
}

#[tokio::test]
async fn test_unknown_permission_is_localized_404() {
    let response = get(create_app(), "/api/v1/permissions/approve", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Разрешение не найдено");
}

// ==================== Fallback Tests ====================

#[tokio::test]
async fn test_fallback_404_is_localized() {
    let response = get(create_app(), "/does/not/exist", Some("en")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Not Found");
    assert_eq!(response.body["message"], "Resource not found");
    assert_eq!(response.body["path"], "/does/not/exist");
    assert_eq!(response.content_language.as_deref(), Some("en"));
}

// ==================== Metrics Tests ====================

#[tokio::test]
async fn test_metrics_count_resolution_sources() {
    let app = create_app();

    get(app.clone(), "/health?lang=en", None).await;
    get(app.clone(), "/health", Some("kk")).await;
    let response = get(app, "/metrics/i18n", None).await;

    assert_eq!(response.body["total_requests"], 3);
    assert_eq!(response.body["resolved_by_override"], 1);
    assert_eq!(response.body["resolved_by_header"], 1);
    assert_eq!(response.body["resolved_by_default"], 1);
}
