//! Customers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer},
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::CustomerNotFound(id))
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new customer
    pub async fn create(&self, customer: &CreateCustomer) -> AppResult<Customer> {
        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (username, email, book_allowance, join_date)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(&customer.username)
        .bind(&customer.email)
        .bind(customer.book_allowance.unwrap_or(3))
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// List all customers
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY username")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }
}
