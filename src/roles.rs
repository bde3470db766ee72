//! Role lookup by value.
//!
//! Roles carry their title and description in every supported language; the
//! DTO handed to clients holds only the text for the request's language.

use crate::i18n::{Language, LocalizedText};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const ADMIN_ROLE: &str = "admin";
pub const MODERATOR_ROLE: &str = "moderator";

/// Persisted role with multi-language text columns.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub value: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Client-facing role with text resolved for one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDto {
    pub id: String,
    pub title: String,
    pub value: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RoleDto {
    pub fn from_role(role: &Role, language: Language) -> Self {
        Self {
            id: role.id.clone(),
            title: role.title.resolve(language).to_string(),
            value: role.value.clone(),
            description: role.description.resolve(language).to_string(),
            created_at: role.created_at,
            updated_at: role.updated_at,
            deleted_at: role.deleted_at,
        }
    }
}

pub trait RoleRepository: Send + Sync {
    fn get_by_value(&self, value: &str) -> Result<Option<Role>>;
}

/// Role storage held in memory.
pub struct InMemoryRoleRepository {
    roles: Vec<Role>,
}

impl InMemoryRoleRepository {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Repository holding the built-in `admin` and `moderator` roles.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let role = |id: &str, value: &str, title: LocalizedText, description: LocalizedText| Role {
            id: id.to_string(),
            value: value.to_string(),
            title,
            description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        Self::new(vec![
            role(
                "0b9c5a3e-1f57-4a3e-9d43-6f1c2e7a9b01",
                ADMIN_ROLE,
                LocalizedText::new("Администратор")
                    .with_translation(Language::ENGLISH, Some("Administrator"))
                    .with_translation(Language::KAZAKH, Some("Әкімші")),
                LocalizedText::new(
                    "Глобальная управляющая роль с доступом ко всем возможностям системы",
                )
                .with_translation(
                    Language::ENGLISH,
                    Some("Global administrative role with access to all system features"),
                )
                .with_translation(
                    Language::KAZAKH,
                    Some("Жүйенің барлық мүмкіндіктеріне қолжетімділігі бар жаһандық басқарушы рөл"),
                ),
            ),
            role(
                "5d2e8f14-7c3b-4b6a-a2d9-3e8f0c1b7d42",
                MODERATOR_ROLE,
                LocalizedText::new("Модератор")
                    .with_translation(Language::ENGLISH, Some("Moderator"))
                    .with_translation(Language::KAZAKH, Some("Модератор")),
                LocalizedText::new("Роль модератора с ограниченным набором разрешений")
                    .with_translation(
                        Language::ENGLISH,
                        Some("Moderator role with limited set of permissions"),
                    )
                    .with_translation(
                        Language::KAZAKH,
                        Some("Шектеулі рұқсаттар жиынтығы бар модератор рөлі"),
                    ),
            ),
        ])
    }
}

impl RoleRepository for InMemoryRoleRepository {
    fn get_by_value(&self, value: &str) -> Result<Option<Role>> {
        Ok(self.roles.iter().find(|role| role.value == value).cloned())
    }
}

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("role value cannot be empty")]
    EmptyValue,

    #[error("role '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Use case: fetch one role by its value, localized for the caller.
#[derive(Clone)]
pub struct GetRoleByValue {
    repo: Arc<dyn RoleRepository>,
}

impl GetRoleByValue {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self {
        Self { repo }
    }

    pub fn validate(&self, value: &str) -> Result<(), RoleError> {
        if value.trim().is_empty() {
            return Err(RoleError::EmptyValue);
        }
        Ok(())
    }

    pub fn execute(&self, value: &str, language: Language) -> Result<RoleDto, RoleError> {
        self.validate(value)?;

        let role = self
            .repo
            .get_by_value(value)?
            .ok_or_else(|| RoleError::NotFound(value.to_string()))?;

        debug!("Found role '{}' for language '{}'", role.value, language);
        Ok(RoleDto::from_role(&role, language))
    }
}
