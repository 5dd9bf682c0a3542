//! Customer model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Customer model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Maximum number of simultaneous unreturned loans
    pub book_allowance: i32,
    pub join_date: DateTime<Utc>,
}

/// Create customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    /// Defaults to 3 when omitted
    #[validate(range(min = 0, max = 100))]
    pub book_allowance: Option<i32>,
}
