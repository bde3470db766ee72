use anyhow::{Context, Result};
use localized_api::config::Config;
use localized_api::i18n::{CatalogValidator, I18n, Language, LanguageResolver, MessageCatalog};
use localized_api::permissions::{GetPermissionByValue, InMemoryPermissionRepository};
use localized_api::roles::{GetRoleByValue, InMemoryRoleRepository};
use localized_api::server::{self, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_api=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting {} v{}", config.app_name, config.app_version);

    // A missing or malformed locale file is fatal
    let catalog = MessageCatalog::load(&config.locales_dir)
        .with_context(|| format!("Failed to load locales from '{}'", config.locales_dir))?;

    let report = CatalogValidator::validate(&catalog);
    for warning in &report.warnings {
        warn!("Locale check: {}", warning);
    }
    for problem in &report.errors {
        error!("Locale check: {}", problem);
    }

    info!(
        "Language negotiation: {:?} (default language '{}')",
        config.negotiation,
        Language::DEFAULT
    );

    let i18n = I18n::new(Arc::new(catalog), LanguageResolver::new(config.negotiation));
    let state = AppState {
        i18n,
        roles: GetRoleByValue::new(Arc::new(InMemoryRoleRepository::seeded())),
        permissions: GetPermissionByValue::new(Arc::new(InMemoryPermissionRepository::seeded())),
        config: Arc::new(config),
    };

    server::serve(state).await
}
