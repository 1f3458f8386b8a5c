use sqlx::SqliteConnection;

use crate::pkg::internal::adaptors::applications::spec::{APPLICATION_COLUMNS, ApplicationEntry};
use crate::prelude::Result;

pub struct ApplicationSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<ApplicationEntry>> {
        let rows = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY id"
        ))
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
