//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    metadata::BookMetadata,
    models::book::{Book, BookDetails, BookQuery},
    models::review::{CreateReview, Review},
};

/// Add book request
#[derive(Deserialize, ToSchema)]
pub struct CreateBookRequest {
    /// ISBN in 10- or 13-digit form; punctuation is tolerated
    pub isbn: String,
    /// Number of lendable copies to register (at least one)
    pub copies: Option<u32>,
}

/// Paginated book list
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub total: i64,
}

/// Search the catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let (books, total) = state.services.catalog.search(&query).await?;
    Ok(Json(BookListResponse { books, total }))
}

/// Add a book by ISBN, resolving metadata from the provider chain
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book catalogued", body = Book),
        (status = 400, description = "Invalid ISBN"),
        (status = 404, description = "No provider had metadata"),
        (status = 422, description = "Non English-language identifier")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state
        .services
        .catalog
        .add_book(&request.isbn, request.copies.unwrap_or(1))
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book's detail view
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "ISBN in 10- or 13-digit form")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookDetails>> {
    let details = state.services.catalog.details(&isbn).await?;
    Ok(Json(details))
}

/// Delete a book and its copies
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "ISBN in 10- or 13-digit form")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Preview provider metadata for an ISBN without cataloguing it
#[utoipa::path(
    get,
    path = "/books/{isbn}/metadata",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "ISBN in 10- or 13-digit form")
    ),
    responses(
        (status = 200, description = "Resolved metadata", body = BookMetadata),
        (status = 400, description = "Invalid ISBN"),
        (status = 404, description = "No provider had metadata")
    )
)]
pub async fn lookup_metadata(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookMetadata>> {
    let meta = state.services.metadata.lookup(&isbn).await?;
    Ok(Json(meta))
}

/// Review a book
#[utoipa::path(
    post,
    path = "/books/{isbn}/reviews",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "ISBN in 10- or 13-digit form")
    ),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 404, description = "Book or customer not found"),
        (status = 409, description = "Customer already reviewed this book")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
    Json(request): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state.services.catalog.add_review(&isbn, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// List a book's reviews
#[utoipa::path(
    get,
    path = "/books/{isbn}/reviews",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "ISBN in 10- or 13-digit form")
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.services.catalog.reviews(&isbn).await?;
    Ok(Json(reviews))
}
