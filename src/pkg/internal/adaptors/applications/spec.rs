use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::pkg::internal::adaptors::null_as_default;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEntry {
    pub id: i64,
    pub primary_contact: String,
    #[sqlx(json)]
    pub additional_contacts: Value,
    pub name: String,
    pub about: String,
    pub vacancy_id: i64,
    /// Open set; "pending", "processed" and "rejected" are the ones in use.
    pub status: String,
    pub salary_expectation: String,
    pub available_from: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationInput {
    #[serde(deserialize_with = "null_as_default")]
    pub primary_contact: String,
    pub additional_contacts: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vacancy_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub salary_expectation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub available_from: String,
}

pub(crate) const APPLICATION_COLUMNS: &str = "id, primary_contact, additional_contacts, name, about, \
     vacancy_id, status, salary_expectation, available_from, created_at, updated_at";
