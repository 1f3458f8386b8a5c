use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::pkg::internal::adaptors::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VacancyEntry {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub header_image: String,
    pub bg_gradient: String,
    #[sqlx(json)]
    pub requirements: Value,
    #[sqlx(json)]
    pub tech_stack: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller may supply when creating or patching a vacancy. Anything
/// else in the payload (`id`, timestamps) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VacancyInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub header_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bg_gradient: String,
    pub requirements: Value,
    pub tech_stack: Value,
}

pub(crate) const VACANCY_COLUMNS: &str = "id, title, subtitle, description, header_image, bg_gradient, \
     requirements, tech_stack, created_at, updated_at";
