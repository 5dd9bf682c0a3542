//! Reviews repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::review::{CreateReview, Review},
};

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// True if the customer has already reviewed the book
    pub async fn exists(&self, customer_id: i32, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE customer_id = $1 AND isbn = $2)",
        )
        .bind(customer_id)
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a review; one per (customer, book)
    pub async fn create(&self, isbn: &str, review: &CreateReview) -> AppResult<Review> {
        if self.exists(review.customer_id, isbn).await? {
            return Err(AppError::Conflict(
                "Customer has already reviewed this book".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (isbn, customer_id, rating, review, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(isbn)
        .bind(review.customer_id)
        .bind(review.rating)
        .bind(&review.review)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Reviews for a book, newest first
    pub async fn list_for_book(&self, isbn: &str) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE isbn = $1 ORDER BY created_at DESC",
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }
}
