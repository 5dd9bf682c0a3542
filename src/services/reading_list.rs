//! Reading-list bookkeeping driven by loan lifecycle events.

use crate::{
    error::AppResult,
    models::loan::LoanEvent,
    models::reading_list::{ReadingListEntry, ReadingStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadingListService {
    repository: Repository,
}

impl ReadingListService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fold one loan lifecycle event into the reading list: checking a
    /// book out marks it Reading, returning it marks it Read.
    pub async fn apply(&self, event: &LoanEvent) -> AppResult<()> {
        match event {
            LoanEvent::Created { customer_id, isbn } => {
                self.repository
                    .reading_list
                    .set_status(*customer_id, isbn, ReadingStatus::Reading)
                    .await
            }
            LoanEvent::Returned { customer_id, isbn } => {
                self.repository
                    .reading_list
                    .set_status(*customer_id, isbn, ReadingStatus::Read)
                    .await
            }
        }
    }

    /// Flag a book as wanted. Books the customer already tracks keep
    /// their current status, so a read book never regresses to wanted.
    pub async fn want(&self, customer_id: i32, isbn: &str) -> AppResult<bool> {
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.books.get_by_isbn(isbn).await?;
        self.repository
            .reading_list
            .set_status_if_absent(customer_id, isbn, ReadingStatus::Want)
            .await
    }

    /// A customer's full reading list
    pub async fn list(&self, customer_id: i32) -> AppResult<Vec<ReadingListEntry>> {
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.reading_list.list_for_customer(customer_id).await
    }
}
