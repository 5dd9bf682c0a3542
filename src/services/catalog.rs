//! Catalog service: adding books by ISBN with metadata resolution,
//! search, detail views and deletion.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    isbn,
    metadata::BookMetadata,
    models::book::{Book, BookDetails, BookQuery},
    models::review::{CreateReview, Review},
    repository::Repository,
    services::metadata::MetadataService,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    metadata: MetadataService,
}

impl CatalogService {
    pub fn new(repository: Repository, metadata: MetadataService) -> Self {
        Self { repository, metadata }
    }

    /// Add a book by ISBN, resolving its metadata, and register `copies`
    /// lendable copies of it.
    ///
    /// Idempotent on the book itself: a known ISBN skips the provider
    /// chain and English-identifier policy and only gains copies.
    pub async fn add_book(&self, raw_isbn: &str, copies: u32) -> AppResult<Book> {
        let canonical = MetadataService::canonical_isbn(raw_isbn)?;

        if let Some(existing) = self.repository.books.find_by_isbn(&canonical).await? {
            tracing::info!("Book {} already catalogued, adding copies only", canonical);
            self.add_copies(&canonical, copies).await?;
            return Ok(existing);
        }

        if !isbn::has_english_identifier(&canonical) {
            return Err(AppError::NonEnglishIdentifier(canonical));
        }

        let raw_meta = self.metadata.lookup(&canonical).await?;
        let meta = normalize_metadata(raw_meta);

        let book = self
            .repository
            .books
            .create_from_metadata(&canonical, &meta)
            .await?;
        self.add_copies(&canonical, copies).await?;

        tracing::info!("Catalogued book {} ({})", book.title, canonical);
        Ok(book)
    }

    /// At least one copy is always registered for a new book.
    async fn add_copies(&self, isbn: &str, copies: u32) -> AppResult<()> {
        for _ in 0..copies.max(1) {
            self.repository.books.add_copy(isbn).await?;
        }
        Ok(())
    }

    /// Search books over title and subtitle
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Detail view for a single book
    pub async fn details(&self, raw_isbn: &str) -> AppResult<BookDetails> {
        let canonical = MetadataService::canonical_isbn(raw_isbn)?;
        self.repository.books.details(&canonical).await
    }

    /// Delete a book and its copies
    pub async fn delete(&self, raw_isbn: &str) -> AppResult<()> {
        let canonical = MetadataService::canonical_isbn(raw_isbn)?;
        self.repository.books.delete(&canonical).await
    }

    /// Attach a customer's review to a book
    pub async fn add_review(&self, raw_isbn: &str, review: CreateReview) -> AppResult<Review> {
        review
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let canonical = MetadataService::canonical_isbn(raw_isbn)?;
        self.repository.books.get_by_isbn(&canonical).await?;
        self.repository.customers.get_by_id(review.customer_id).await?;
        self.repository.reviews.create(&canonical, &review).await
    }

    /// Reviews for a book, newest first
    pub async fn reviews(&self, raw_isbn: &str) -> AppResult<Vec<Review>> {
        let canonical = MetadataService::canonical_isbn(raw_isbn)?;
        self.repository.books.get_by_isbn(&canonical).await?;
        self.repository.reviews.list_for_book(&canonical).await
    }
}

/// Normalize provider casing: titles and author names arrive in
/// inconsistent case across providers, so each word is capitalized.
fn normalize_metadata(meta: BookMetadata) -> BookMetadata {
    BookMetadata {
        title: capwords(&meta.title),
        subtitle: meta.subtitle.as_deref().map(capwords),
        authors: meta.authors.iter().map(|a| capwords(a)).collect(),
        categories: meta.categories,
        cover_url: meta.cover_url,
    }
}

/// Capitalize the first letter of each whitespace-separated word,
/// lowercasing the rest, and collapse runs of whitespace.
fn capwords(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capwords_title_cases_each_word() {
        assert_eq!(capwords("the pragmatic programmer"), "The Pragmatic Programmer");
        assert_eq!(capwords("LAND OF LISP"), "Land Of Lisp");
        assert_eq!(capwords("  spaced   out  "), "Spaced Out");
        assert_eq!(capwords(""), "");
    }

    #[test]
    fn normalize_leaves_categories_and_cover_alone() {
        let meta = BookMetadata {
            title: "land of lisp".to_string(),
            subtitle: Some("learn to program in lisp".to_string()),
            authors: vec!["conrad barski".to_string()],
            categories: vec!["COMPUTERS".to_string()],
            cover_url: Some("http://example.com/cover.jpg".to_string()),
        };
        let normalized = normalize_metadata(meta);
        assert_eq!(normalized.title, "Land Of Lisp");
        assert_eq!(normalized.subtitle.as_deref(), Some("Learn To Program In Lisp"));
        assert_eq!(normalized.authors, vec!["Conrad Barski".to_string()]);
        assert_eq!(normalized.categories, vec!["COMPUTERS".to_string()]);
        assert_eq!(
            normalized.cover_url.as_deref(),
            Some("http://example.com/cover.jpg")
        );
    }
}
