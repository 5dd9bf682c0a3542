//! Repository layer for database operations

pub mod books;
pub mod customers;
pub mod loans;
pub mod reading_list;
pub mod reviews;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub customers: customers::CustomersRepository,
    pub loans: loans::LoansRepository,
    pub reading_list: reading_list::ReadingListRepository,
    pub reviews: reviews::ReviewsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            reading_list: reading_list::ReadingListRepository::new(pool.clone()),
            reviews: reviews::ReviewsRepository::new(pool.clone()),
            pool,
        }
    }
}
