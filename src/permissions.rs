//! Permission lookup by value.
//!
//! Same shape as roles: multi-language title and description columns,
//! resolved to one language for the client with the Russian text as fallback.

use crate::i18n::{Language, LocalizedText};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const MANAGE_PERMISSION: &str = "manage";
pub const CREATE_PERMISSION: &str = "create";
pub const READ_PERMISSION: &str = "read";
pub const EDIT_PERMISSION: &str = "edit";
pub const DELETE_PERMISSION: &str = "delete";

#[derive(Debug, Clone)]
pub struct Permission {
    pub id: String,
    pub value: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Client-facing permission with text resolved for one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionDto {
    pub id: String,
    pub title: String,
    pub value: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PermissionDto {
    pub fn from_permission(permission: &Permission, language: Language) -> Self {
        Self {
            id: permission.id.clone(),
            title: permission.title.resolve(language).to_string(),
            value: permission.value.clone(),
            description: permission.description.resolve(language).to_string(),
            created_at: permission.created_at,
            updated_at: permission.updated_at,
            deleted_at: permission.deleted_at,
        }
    }
}

pub trait PermissionRepository: Send + Sync {
    fn get_by_value(&self, value: &str) -> Result<Option<Permission>>;
}

pub struct InMemoryPermissionRepository {
    permissions: Vec<Permission>,
}

impl InMemoryPermissionRepository {
    pub fn new(permissions: Vec<Permission>) -> Self {
        Self { permissions }
    }

    /// Repository holding the five built-in CRUD permissions.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let seeds: [(&str, &str, [&str; 3], [&str; 3]); 5] = [
            (
                "3f6a1c0e-2b4d-4e8a-9c71-5d0e8b2a6f11",
                MANAGE_PERMISSION,
                ["Полное управление CRUD", "Manage All CRUD", "CRUD-ті толық басқару"],
                [
                    "Глобальное управление всеми операциями: создание, чтение, редактирование и удаление",
                    "Global management of all operations: create, read, update and delete",
                    "Барлық операцияларды жаһандық басқару: жасау, оқу, өңдеу және жою",
                ],
            ),
            (
                "7a2e9d41-6c3f-4b15-8e02-1f9c4d7b3a22",
                CREATE_PERMISSION,
                ["Создание записей", "Create All", "Жазбаларды жасау"],
                [
                    "Глобальное разрешение на создание всех типов записей",
                    "Global permission to create all types of records",
                    "Барлық жазба түрлерін жасауға жаһандық рұқсат",
                ],
            ),
            (
                "b81d4f27-0e6a-4c93-a5b8-2c7e1f0d9a33",
                READ_PERMISSION,
                ["Чтение записей", "Read All", "Жазбаларды оқу"],
                [
                    "Глобальное разрешение на чтение всех типов записей",
                    "Global permission to read all types of records",
                    "Барлық жазба түрлерін оқуға жаһандық рұқсат",
                ],
            ),
            (
                "c4e7a8b2-9d1f-4a60-b3c5-8f2d6e1a0b44",
                EDIT_PERMISSION,
                ["Редактирование записей", "Edit All", "Жазбаларды өңдеу"],
                [
                    "Глобальное разрешение на редактирование всех типов записей",
                    "Global permission to edit all types of records",
                    "Барлық жазба түрлерін өңдеуге жаһандық рұқсат",
                ],
            ),
            (
                "e9b3c6d5-4a2e-4f71-9d08-3b1a7c5e2d55",
                DELETE_PERMISSION,
                ["Удаление записей", "Delete All", "Жазбаларды жою"],
                [
                    "Глобальное разрешение на удаление всех типов записей",
                    "Global permission to delete all types of records",
                    "Барлық жазба түрлерін жоюға жаһандық рұқсат",
                ],
            ),
        ];

        let localized = |[ru, en, kk]: [&str; 3]| {
            LocalizedText::new(ru)
                .with_translation(Language::ENGLISH, Some(en))
                .with_translation(Language::KAZAKH, Some(kk))
        };

        Self::new(
            seeds
                .into_iter()
                .map(|(id, value, title, description)| Permission {
                    id: id.to_string(),
                    value: value.to_string(),
                    title: localized(title),
                    description: localized(description),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                })
                .collect(),
        )
    }
}

impl PermissionRepository for InMemoryPermissionRepository {
    fn get_by_value(&self, value: &str) -> Result<Option<Permission>> {
        Ok(self
            .permissions
            .iter()
            .find(|permission| permission.value == value)
            .cloned())
    }
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("permission value cannot be empty")]
    EmptyValue,

    #[error("permission '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct GetPermissionByValue {
    repo: Arc<dyn PermissionRepository>,
}

impl GetPermissionByValue {
    pub fn new(repo: Arc<dyn PermissionRepository>) -> Self {
        Self { repo }
    }

    pub fn validate(&self, value: &str) -> Result<(), PermissionError> {
        if value.trim().is_empty() {
            return Err(PermissionError::EmptyValue);
        }
        Ok(())
    }

    pub fn execute(&self, value: &str, language: Language) -> Result<PermissionDto, PermissionError> {
        self.validate(value)?;

        let permission = self
            .repo
            .get_by_value(value)?
            .ok_or_else(|| PermissionError::NotFound(value.to_string()))?;

        debug!("Found permission '{}' for language '{}'", permission.value, language);
        Ok(PermissionDto::from_permission(&permission, language))
    }
}
