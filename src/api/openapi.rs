//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, customers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folium API",
        version = "1.0.0",
        description = "Library lending REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::delete_book,
        books::lookup_metadata,
        books::create_review,
        books::list_reviews,
        // Customers
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        customers::get_customer_loans,
        customers::get_customer_overdue,
        customers::return_all_loans,
        customers::get_read_books,
        customers::get_reading_list,
        customers::add_wanted_book,
        // Loans
        loans::create_loan,
        loans::return_loan,
        loans::renew_loan,
        loans::list_overdue,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::BookCopy,
            crate::metadata::BookMetadata,
            books::CreateBookRequest,
            books::BookListResponse,
            // Reviews
            crate::models::review::Review,
            crate::models::review::CreateReview,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            customers::WantRequest,
            customers::BulkReturnResponse,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::DueWarnLevel,
            loans::CreateLoanRequest,
            loans::LoanResponse,
            // Reading list
            crate::models::reading_list::ReadingListEntry,
            crate::models::reading_list::ReadingStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog and review management"),
        (name = "customers", description = "Customer accounts, loans and reading lists"),
        (name = "loans", description = "Loan lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
