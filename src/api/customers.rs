//! Customer endpoints, including per-customer loan and reading-list views

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::Book,
    models::customer::{CreateCustomer, Customer},
    models::loan::{Loan, LoanDetails},
    models::reading_list::ReadingListEntry,
};

/// Want-to-read request
#[derive(Deserialize, ToSchema)]
pub struct WantRequest {
    /// ISBN in 10- or 13-digit form
    pub isbn: String,
}

/// Bulk return outcome
#[derive(Serialize, ToSchema)]
pub struct BulkReturnResponse {
    /// Loans successfully returned
    pub returned: Vec<Loan>,
    pub message: String,
}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    responses(
        (status = 200, description = "All customers", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.services.customers.list().await?;
    Ok(Json(customers))
}

/// Register a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.services.customers.create(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get a customer
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get(customer_id).await?;
    Ok(Json(customer))
}

/// A customer's open loans
#[utoipa::path(
    get,
    path = "/customers/{id}/loans",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Open loans with due-date warnings", body = Vec<LoanDetails>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_loans(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.loans_for_customer(customer_id).await?;
    Ok(Json(loans))
}

/// A customer's overdue loans
#[utoipa::path(
    get,
    path = "/customers/{id}/loans/overdue",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_overdue(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.overdue_for_customer(customer_id).await?;
    Ok(Json(loans))
}

/// Return every open loan of a customer
#[utoipa::path(
    post,
    path = "/customers/{id}/returns",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Loans returned", body = BulkReturnResponse),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn return_all_loans(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<BulkReturnResponse>> {
    let returned = state.services.loans.return_all(customer_id).await?;
    let message = format!("{} loans returned", returned.len());
    Ok(Json(BulkReturnResponse { returned, message }))
}

/// Distinct books the customer has loaned and returned
#[utoipa::path(
    get,
    path = "/customers/{id}/read-books",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Previously read books", body = Vec<Book>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_read_books(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.loans.read_list(customer_id).await?;
    Ok(Json(books))
}

/// A customer's reading list
#[utoipa::path(
    get,
    path = "/customers/{id}/reading-list",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Reading list entries", body = Vec<ReadingListEntry>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_reading_list(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<ReadingListEntry>>> {
    let entries = state.services.reading_list.list(customer_id).await?;
    Ok(Json(entries))
}

/// Flag a book as wanted on the customer's reading list
#[utoipa::path(
    post,
    path = "/customers/{id}/reading-list",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = WantRequest,
    responses(
        (status = 201, description = "Book added to the reading list"),
        (status = 200, description = "Book was already tracked; status unchanged"),
        (status = 404, description = "Customer or book not found")
    )
)]
pub async fn add_wanted_book(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
    Json(request): Json<WantRequest>,
) -> AppResult<StatusCode> {
    let isbn = crate::services::metadata::MetadataService::canonical_isbn(&request.isbn)?;
    let inserted = state.services.reading_list.want(customer_id, &isbn).await?;
    Ok(if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    })
}
