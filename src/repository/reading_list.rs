//! Reading-list repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::reading_list::{ReadingListEntry, ReadingStatus},
};

#[derive(Clone)]
pub struct ReadingListRepository {
    pool: Pool<Postgres>,
}

impl ReadingListRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Upsert a customer's status for a book
    pub async fn set_status(
        &self,
        customer_id: i32,
        isbn: &str,
        status: ReadingStatus,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reading_list (customer_id, isbn, status, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (customer_id, isbn)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            "#,
        )
        .bind(customer_id)
        .bind(isbn)
        .bind(status.as_code())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a status only when the book has no entry yet; an existing
    /// entry, whatever its status, is left untouched.
    pub async fn set_status_if_absent(
        &self,
        customer_id: i32,
        isbn: &str,
        status: ReadingStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO reading_list (customer_id, isbn, status, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (customer_id, isbn) DO NOTHING
            "#,
        )
        .bind(customer_id)
        .bind(isbn)
        .bind(status.as_code())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A customer's reading list joined with book titles, most recently
    /// touched first.
    pub async fn list_for_customer(&self, customer_id: i32) -> AppResult<Vec<ReadingListEntry>> {
        let entries = sqlx::query_as::<_, ReadingListEntry>(
            r#"
            SELECT r.isbn, b.title, r.status, r.updated_at
            FROM reading_list r
            JOIN books b ON b.isbn = r.isbn
            WHERE r.customer_id = $1
            ORDER BY r.updated_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
