//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    metadata::BookMetadata,
    models::book::{Book, BookCopy, BookDetails, BookQuery},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by canonical ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.find_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    /// Find book by canonical ISBN, if present
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Create a book from normalized provider metadata, linking authors
    /// and genres (created on first sight, reused afterwards).
    pub async fn create_from_metadata(&self, isbn: &str, meta: &BookMetadata) -> AppResult<Book> {
        let now = Utc::now();

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, subtitle, cover_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(isbn)
        .bind(&meta.title)
        .bind(&meta.subtitle)
        .bind(&meta.cover_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        for name in &meta.authors {
            let author_id = self.get_or_create_author(name).await?;
            sqlx::query(
                "INSERT INTO book_authors (isbn, author_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(isbn)
            .bind(author_id)
            .execute(&self.pool)
            .await?;
        }

        for name in &meta.categories {
            let genre_id = self.get_or_create_genre(name).await?;
            sqlx::query(
                "INSERT INTO book_genres (isbn, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(isbn)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(book)
    }

    async fn get_or_create_author(&self, name: &str) -> AppResult<i32> {
        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM authors WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO authors (name) VALUES ($1) ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get_or_create_genre(&self, name: &str) -> AppResult<i32> {
        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO genres (name) VALUES ($1) ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Add one lendable copy of a book
    pub async fn add_copy(&self, isbn: &str) -> AppResult<BookCopy> {
        let copy = sqlx::query_as::<_, BookCopy>(
            "INSERT INTO book_copies (isbn, created_at) VALUES ($1, $2) RETURNING *",
        )
        .bind(isbn)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(copy)
    }

    /// First copy of a book with no unreturned loan, if any
    pub async fn available_copy(&self, isbn: &str) -> AppResult<Option<BookCopy>> {
        let copy = sqlx::query_as::<_, BookCopy>(
            r#"
            SELECT c.* FROM book_copies c
            WHERE c.isbn = $1
              AND NOT EXISTS (
                  SELECT 1 FROM loans l
                  WHERE l.copy_id = c.id AND NOT l.returned
              )
            ORDER BY c.id
            LIMIT 1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(copy)
    }

    /// Search books over title and subtitle
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let pattern = query
            .q
            .as_ref()
            .map(|q| format!("%{}%", q))
            .unwrap_or_else(|| "%".to_string());
        let limit = query.limit.unwrap_or(100).clamp(1, 500);
        let offset = query.offset.unwrap_or(0).max(0);

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1 OR subtitle ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE title ILIKE $1 OR subtitle ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Full detail view: relations, copy counts, average review rating
    pub async fn details(&self, isbn: &str) -> AppResult<BookDetails> {
        let book = self.get_by_isbn(isbn).await?;

        let authors: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT a.name FROM authors a
            JOIN book_authors ba ON ba.author_id = a.id
            WHERE ba.isbn = $1
            ORDER BY a.name
            "#,
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await?;

        let genres: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT g.name FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.isbn = $1
            ORDER BY g.name
            "#,
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await?;

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS nb_copies,
                   COALESCE(SUM(
                       CASE WHEN NOT EXISTS (
                           SELECT 1 FROM loans l
                           WHERE l.copy_id = c.id AND NOT l.returned
                       ) THEN 1 ELSE 0 END
                   ), 0) AS nb_available
            FROM book_copies c
            WHERE c.isbn = $1
            "#,
        )
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;

        let average_rating: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE isbn = $1")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?;

        Ok(BookDetails {
            isbn: book.isbn,
            title: book.title,
            subtitle: book.subtitle,
            cover_url: book.cover_url,
            authors,
            genres,
            nb_copies: row.get("nb_copies"),
            nb_available: row.get("nb_available"),
            average_rating,
            created_at: book.created_at,
        })
    }

    /// Delete a book and its copies
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.get_by_isbn(isbn).await?;
        sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
