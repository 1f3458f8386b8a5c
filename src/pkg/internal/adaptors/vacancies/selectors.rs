use sqlx::SqliteConnection;

use crate::pkg::internal::adaptors::vacancies::spec::{VACANCY_COLUMNS, VacancyEntry};
use crate::prelude::Result;

pub struct VacancySelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> VacancySelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        VacancySelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<VacancyEntry>> {
        let row = sqlx::query_as::<_, VacancyEntry>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<VacancyEntry>> {
        let rows = sqlx::query_as::<_, VacancyEntry>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies ORDER BY id"
        ))
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
