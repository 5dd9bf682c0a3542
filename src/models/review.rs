//! Review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Review model from database. One review per (customer, book).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub isbn: String,
    pub customer_id: i32,
    pub rating: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub customer_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(min = 1))]
    pub review: String,
}
