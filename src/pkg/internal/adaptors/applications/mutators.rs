use chrono::Utc;
use sqlx::{SqliteConnection, types::Json};

use crate::pkg::internal::adaptors::applications::spec::{
    APPLICATION_COLUMNS, ApplicationEntry, ApplicationInput, STATUS_PENDING,
};
use crate::prelude::Result;

pub struct ApplicationMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ApplicationMutator { pool }
    }

    /// Stores a new submission. Whatever status the applicant sent is dropped.
    pub async fn create(&mut self, application: ApplicationInput) -> Result<ApplicationEntry> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            r#"
            INSERT INTO applications (primary_contact, additional_contacts, name, about, vacancy_id,
                                      status, salary_expectation, available_from, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(&application.primary_contact)
        .bind(Json(&application.additional_contacts))
        .bind(&application.name)
        .bind(&application.about)
        .bind(application.vacancy_id)
        .bind(STATUS_PENDING)
        .bind(&application.salary_expectation)
        .bind(&application.available_from)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrites every caller-owned column, so omitted fields end up empty.
    pub async fn replace(
        &mut self,
        id: i64,
        application: ApplicationInput,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            r#"
            UPDATE applications
            SET primary_contact = ?, additional_contacts = ?, name = ?, about = ?, vacancy_id = ?,
                status = ?, salary_expectation = ?, available_from = ?, updated_at = ?
            WHERE id = ?
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(&application.primary_contact)
        .bind(Json(&application.additional_contacts))
        .bind(&application.name)
        .bind(&application.about)
        .bind(application.vacancy_id)
        .bind(&application.status)
        .bind(&application.salary_expectation)
        .bind(&application.available_from)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
