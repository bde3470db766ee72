//! Locale check binary - loads every locale file and reports coverage problems
//!
//! Usage:
//!   cargo run --bin check-locales              # Check ./locales
//!   cargo run --bin check-locales -- some/dir  # Check another directory
//!
//! Optional:
//! - LOCALES_DIR (defaults to locales, overridden by the first argument)
//!
//! Exits non-zero when a locale file cannot be loaded or the report has errors.

use anyhow::{bail, Context, Result};
use localized_api::i18n::{CatalogValidator, MessageCatalog};
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_api=info".parse()?),
        )
        .init();

    let dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LOCALES_DIR").ok())
        .unwrap_or_else(|| "locales".to_string());

    info!("Checking locales in '{}'", dir);
    let catalog = MessageCatalog::load(&dir)
        .with_context(|| format!("Failed to load locales from '{}'", dir))?;

    for language in catalog.languages() {
        println!("{:>3}: {} messages", language.code(), catalog.len(language));
    }

    let report = CatalogValidator::validate(&catalog);
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for problem in &report.errors {
        println!("error: {}", problem);
    }

    if report.has_errors() {
        bail!("{} locale error(s) found", report.errors.len());
    }

    if report.is_clean() {
        println!("All locales are consistent");
    }
    Ok(())
}
