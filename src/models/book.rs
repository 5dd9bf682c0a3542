//! Book catalog models.
//!
//! A book is keyed by its canonical ISBN-13 and owns zero or more lendable
//! copies. Author and genre relations are populated once from provider
//! metadata at creation time and never automatically refreshed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Canonical 13-digit ISBN, primary key
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with relations and availability, for detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub cover_url: Option<String>,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub nb_copies: i64,
    pub nb_available: i64,
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// One physical, lendable copy of a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: i32,
    pub isbn: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Catalog search parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Free-text search over title and subtitle
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
