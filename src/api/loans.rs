//! Loan lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetails},
};

/// Checkout request
#[derive(Deserialize, ToSchema)]
pub struct CreateLoanRequest {
    /// Customer ID
    pub customer_id: i32,
    /// ISBN in 10- or 13-digit form
    pub isbn: String,
}

/// Loan response with due date
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    /// Loan ID
    pub id: i32,
    /// Due date
    pub end_date: NaiveDate,
    /// Renewals so far
    pub nb_renewals: i16,
    /// Status message
    pub message: String,
}

impl LoanResponse {
    fn new(loan: &Loan, message: String) -> Self {
        Self {
            id: loan.id,
            end_date: loan.end_date,
            nb_renewals: loan.nb_renewals,
            message,
        }
    }
}

/// Check a book out to a customer
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanResponse),
        (status = 400, description = "Invalid ISBN"),
        (status = 404, description = "Customer or book not found"),
        (status = 409, description = "Allowance reached, duplicate loan, or no copy available")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let loan = state
        .services
        .loans
        .checkout(request.customer_id, &request.isbn)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse::new(&loan, "Book borrowed successfully".to_string())),
    ))
}

/// Return a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan returned", body = LoanResponse),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state.services.loans.return_loan(loan_id).await?;
    Ok(Json(LoanResponse::new(&loan, "Book returned".to_string())))
}

/// Renew a loan, pushing the due date out by one loan duration
#[utoipa::path(
    post,
    path = "/loans/{id}/renew",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan renewed", body = LoanResponse),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan not due within the renewal window or already returned")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state.services.loans.renew(loan_id).await?;
    let message = format!("Loan renewed ({} renewals)", loan.nb_renewals);
    Ok(Json(LoanResponse::new(&loan, message)))
}

/// All overdue loans, across customers
#[utoipa::path(
    get,
    path = "/loans/overdue",
    tag = "loans",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>)
    )
)]
pub async fn list_overdue(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.overdue().await?;
    Ok(Json(loans))
}
