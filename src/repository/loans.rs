//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

/// A loan row joined with its book, before display fields are derived
#[derive(Debug, Clone)]
pub struct LoanWithBook {
    pub loan: Loan,
    pub isbn: String,
    pub title: String,
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::LoanNotFound(id))
    }

    /// Create a new loan
    pub async fn create(
        &self,
        customer_id: i32,
        copy_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (customer_id, copy_id, start_date, end_date, returned, nb_renewals, created_at)
            VALUES ($1, $2, $3, $4, FALSE, 0, NOW())
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(copy_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(loan)
    }

    /// Count a customer's unreturned loans
    pub async fn unreturned_count(&self, customer_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE customer_id = $1 AND NOT returned",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// True if the customer holds an unreturned loan for any copy of the book
    pub async fn has_unreturned_for_book(&self, customer_id: i32, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM loans l
                JOIN book_copies c ON l.copy_id = c.id
                WHERE l.customer_id = $1 AND c.isbn = $2 AND NOT l.returned
            )
            "#,
        )
        .bind(customer_id)
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// The ISBN of the book behind a loan's copy
    pub async fn book_isbn(&self, loan_id: i32) -> AppResult<String> {
        sqlx::query_scalar(
            "SELECT c.isbn FROM loans l JOIN book_copies c ON l.copy_id = c.id WHERE l.id = $1",
        )
        .bind(loan_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::LoanNotFound(loan_id))
    }

    /// Flag a loan as returned
    pub async fn mark_returned(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            "UPDATE loans SET returned = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(loan_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(loan)
    }

    /// Extend a loan's due date, bumping the renewal counter
    pub async fn extend(&self, loan_id: i32, new_end_date: NaiveDate) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET end_date = $1, nb_renewals = nb_renewals + 1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(new_end_date)
        .bind(loan_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(loan)
    }

    /// A customer's unreturned loans, oldest first
    pub async fn unreturned_for_customer(&self, customer_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE customer_id = $1 AND NOT returned ORDER BY start_date",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// A customer's unreturned loans joined with their books
    pub async fn unreturned_with_books(&self, customer_id: i32) -> AppResult<Vec<LoanWithBook>> {
        let rows = sqlx::query(
            r#"
            SELECT l.*, c.isbn, b.title
            FROM loans l
            JOIN book_copies c ON l.copy_id = c.id
            JOIN books b ON c.isbn = b.isbn
            WHERE l.customer_id = $1 AND NOT l.returned
            ORDER BY l.start_date
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::row_to_loan_with_book).collect())
    }

    /// Unreturned loans due on or before `today`, across all customers.
    /// Overdue is a query-time filter, not persisted state.
    pub async fn overdue(&self, today: NaiveDate) -> AppResult<Vec<LoanWithBook>> {
        let rows = sqlx::query(
            r#"
            SELECT l.*, c.isbn, b.title
            FROM loans l
            JOIN book_copies c ON l.copy_id = c.id
            JOIN books b ON c.isbn = b.isbn
            WHERE NOT l.returned AND l.end_date <= $1
            ORDER BY l.end_date
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::row_to_loan_with_book).collect())
    }

    /// A customer's overdue loans
    pub async fn overdue_for_customer(
        &self,
        customer_id: i32,
        today: NaiveDate,
    ) -> AppResult<Vec<LoanWithBook>> {
        let rows = sqlx::query(
            r#"
            SELECT l.*, c.isbn, b.title
            FROM loans l
            JOIN book_copies c ON l.copy_id = c.id
            JOIN books b ON c.isbn = b.isbn
            WHERE l.customer_id = $1 AND NOT l.returned AND l.end_date <= $2
            ORDER BY l.end_date
            "#,
        )
        .bind(customer_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::row_to_loan_with_book).collect())
    }

    /// Distinct books the customer has previously loaned and returned
    pub async fn read_list(&self, customer_id: i32) -> AppResult<Vec<crate::models::Book>> {
        let books = sqlx::query_as::<_, crate::models::Book>(
            r#"
            SELECT DISTINCT b.* FROM books b
            JOIN book_copies c ON c.isbn = b.isbn
            JOIN loans l ON l.copy_id = c.id
            WHERE l.customer_id = $1 AND l.returned
            ORDER BY b.title
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    fn row_to_loan_with_book(row: sqlx::postgres::PgRow) -> LoanWithBook {
        LoanWithBook {
            loan: Loan {
                id: row.get("id"),
                customer_id: row.get("customer_id"),
                copy_id: row.get("copy_id"),
                start_date: row.get("start_date"),
                end_date: row.get("end_date"),
                returned: row.get("returned"),
                nb_renewals: row.get("nb_renewals"),
                created_at: row.get("created_at"),
            },
            isbn: row.get("isbn"),
            title: row.get("title"),
        }
    }
}
