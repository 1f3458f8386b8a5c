use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, types::Json};

use crate::pkg::internal::adaptors::vacancies::spec::{VACANCY_COLUMNS, VacancyEntry, VacancyInput};
use crate::prelude::Result;

pub struct VacancyMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> VacancyMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        VacancyMutator { pool }
    }

    pub async fn create(&mut self, vacancy: VacancyInput) -> Result<VacancyEntry> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, VacancyEntry>(&format!(
            r#"
            INSERT INTO vacancies (title, subtitle, description, header_image, bg_gradient,
                                   requirements, tech_stack, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {VACANCY_COLUMNS}
            "#
        ))
        .bind(&vacancy.title)
        .bind(&vacancy.subtitle)
        .bind(&vacancy.description)
        .bind(&vacancy.header_image)
        .bind(&vacancy.bg_gradient)
        .bind(Json(&vacancy.requirements))
        .bind(Json(&vacancy.tech_stack))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Merges `patch` over the stored row: only non-empty strings and non-null
    /// JSON values overwrite. `updated_at` is always refreshed.
    pub async fn update(&mut self, id: i64, patch: VacancyInput) -> Result<Option<VacancyEntry>> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE vacancies SET updated_at = ");
        query.push_bind(Utc::now());

        let text_fields = [
            ("title", patch.title),
            ("subtitle", patch.subtitle),
            ("description", patch.description),
            ("header_image", patch.header_image),
            ("bg_gradient", patch.bg_gradient),
        ];
        for (column, value) in text_fields {
            if !value.is_empty() {
                query.push(format!(", {column} = ")).push_bind(value);
            }
        }
        let json_fields = [
            ("requirements", patch.requirements),
            ("tech_stack", patch.tech_stack),
        ];
        for (column, value) in json_fields {
            if !value.is_null() {
                query.push(format!(", {column} = ")).push_bind(Json(value));
            }
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(format!(" RETURNING {VACANCY_COLUMNS}"));

        let row = query
            .build_query_as::<VacancyEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = ?")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
