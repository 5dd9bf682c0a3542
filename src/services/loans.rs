//! Loan lifecycle service: checkout, renewal, return, overdue queries.

use chrono::{Duration, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::loan::{Loan, LoanDetails, LoanEvent},
    repository::{loans::LoanWithBook, Repository},
    services::{metadata::MetadataService, reading_list::ReadingListService},
};

/// Why a checkout request is refused. Ordered by precedence: the
/// allowance is checked before duplicates, duplicates before stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutDenial {
    AllowanceExceeded,
    DuplicateLoan,
    Unavailable,
}

/// Pure admission rule for a checkout. All inputs are gathered by the
/// caller so the decision itself stays trivially testable.
pub fn checkout_gate(
    unreturned: i64,
    allowance: i32,
    holds_same_book: bool,
    copy_available: bool,
) -> Result<(), CheckoutDenial> {
    if unreturned >= allowance as i64 {
        return Err(CheckoutDenial::AllowanceExceeded);
    }
    if holds_same_book {
        return Err(CheckoutDenial::DuplicateLoan);
    }
    if !copy_available {
        return Err(CheckoutDenial::Unavailable);
    }
    Ok(())
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
    reading_list: ReadingListService,
}

impl LoansService {
    pub fn new(
        repository: Repository,
        config: LoansConfig,
        reading_list: ReadingListService,
    ) -> Self {
        Self {
            repository,
            config,
            reading_list,
        }
    }

    /// Check a book out to a customer.
    pub async fn checkout(&self, customer_id: i32, raw_isbn: &str) -> AppResult<Loan> {
        let isbn = MetadataService::canonical_isbn(raw_isbn)?;

        let customer = self.repository.customers.get_by_id(customer_id).await?;
        self.repository.books.get_by_isbn(&isbn).await?;

        let unreturned = self.repository.loans.unreturned_count(customer_id).await?;
        let holds_same_book = self
            .repository
            .loans
            .has_unreturned_for_book(customer_id, &isbn)
            .await?;
        let copy = self.repository.books.available_copy(&isbn).await?;

        checkout_gate(
            unreturned,
            customer.book_allowance,
            holds_same_book,
            copy.is_some(),
        )
        .map_err(|denial| match denial {
            CheckoutDenial::AllowanceExceeded => {
                AppError::AllowanceExceeded("Reached loan limit".to_string())
            }
            CheckoutDenial::DuplicateLoan => AppError::DuplicateLoan(format!(
                "Customer already holds a copy of {}",
                isbn
            )),
            CheckoutDenial::Unavailable => {
                AppError::Unavailable("Book Unavailable".to_string())
            }
        })?;

        // The gate guarantees a copy exists
        let copy = copy.ok_or_else(|| AppError::Unavailable("Book Unavailable".to_string()))?;

        let today = Utc::now().date_naive();
        let end_date = today + Duration::days(self.config.duration_days);
        let loan = self
            .repository
            .loans
            .create(customer_id, copy.id, today, end_date)
            .await?;

        self.reading_list
            .apply(&LoanEvent::Created {
                customer_id,
                isbn: isbn.clone(),
            })
            .await?;

        tracing::info!(
            "Customer {} checked out {} (loan {}, due {})",
            customer_id,
            isbn,
            loan.id,
            end_date
        );
        Ok(loan)
    }

    /// Return a loan, updating the customer's reading list.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        if loan.returned {
            return Err(AppError::Conflict(format!(
                "Loan {} is already returned",
                loan_id
            )));
        }

        let isbn = self.repository.loans.book_isbn(loan_id).await?;
        let loan = self.repository.loans.mark_returned(loan_id).await?;

        self.reading_list
            .apply(&LoanEvent::Returned {
                customer_id: loan.customer_id,
                isbn,
            })
            .await?;

        tracing::info!("Loan {} returned by customer {}", loan.id, loan.customer_id);
        Ok(loan)
    }

    /// Return every unreturned loan of a customer. Best effort: one
    /// failing return is logged and skipped rather than aborting the
    /// rest of the batch.
    pub async fn return_all(&self, customer_id: i32) -> AppResult<Vec<Loan>> {
        self.repository.customers.get_by_id(customer_id).await?;
        let open = self
            .repository
            .loans
            .unreturned_for_customer(customer_id)
            .await?;

        let mut returned = Vec::with_capacity(open.len());
        for loan in open {
            match self.return_loan(loan.id).await {
                Ok(loan) => returned.push(loan),
                Err(e) => {
                    tracing::warn!("Failed to return loan {}: {}", loan.id, e);
                }
            }
        }
        Ok(returned)
    }

    /// Renew a loan: push the due date out by one loan duration.
    /// Only loans due within the renewal window may be renewed; overdue
    /// loans still qualify.
    pub async fn renew(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        let today = Utc::now().date_naive();

        if loan.returned {
            return Err(AppError::NotRenewable(format!(
                "Loan {} is already returned",
                loan_id
            )));
        }
        if !loan.is_renewable(self.config.renew_window_days, today) {
            return Err(AppError::NotRenewable(format!(
                "Loan {} is not due within the next {} days",
                loan_id, self.config.renew_window_days
            )));
        }

        let new_end = loan.end_date + Duration::days(self.config.duration_days);
        let loan = self.repository.loans.extend(loan_id, new_end).await?;
        tracing::info!("Loan {} renewed until {}", loan.id, loan.end_date);
        Ok(loan)
    }

    /// A customer's open loans with display fields derived for today
    pub async fn loans_for_customer(&self, customer_id: i32) -> AppResult<Vec<LoanDetails>> {
        self.repository.customers.get_by_id(customer_id).await?;
        let rows = self
            .repository
            .loans
            .unreturned_with_books(customer_id)
            .await?;
        Ok(self.to_details(rows))
    }

    /// All overdue loans, across customers
    pub async fn overdue(&self) -> AppResult<Vec<LoanDetails>> {
        let today = Utc::now().date_naive();
        let rows = self.repository.loans.overdue(today).await?;
        Ok(self.to_details(rows))
    }

    /// A customer's overdue loans
    pub async fn overdue_for_customer(&self, customer_id: i32) -> AppResult<Vec<LoanDetails>> {
        self.repository.customers.get_by_id(customer_id).await?;
        let today = Utc::now().date_naive();
        let rows = self
            .repository
            .loans
            .overdue_for_customer(customer_id, today)
            .await?;
        Ok(self.to_details(rows))
    }

    /// Distinct books a customer has loaned and returned
    pub async fn read_list(&self, customer_id: i32) -> AppResult<Vec<crate::models::Book>> {
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.loans.read_list(customer_id).await
    }

    fn to_details(&self, rows: Vec<LoanWithBook>) -> Vec<LoanDetails> {
        let today = Utc::now().date_naive();
        rows.into_iter()
            .map(|row| LoanDetails {
                id: row.loan.id,
                customer_id: row.loan.customer_id,
                isbn: row.isbn,
                title: row.title,
                start_date: row.loan.start_date,
                end_date: row.loan.end_date,
                returned: row.loan.returned,
                nb_renewals: row.loan.nb_renewals,
                is_overdue: row.loan.is_overdue(today),
                warn_level: row.loan.warn_level(self.config.duration_days, today),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_admits_when_all_preconditions_hold() {
        assert_eq!(checkout_gate(0, 3, false, true), Ok(()));
        assert_eq!(checkout_gate(2, 3, false, true), Ok(()));
    }

    #[test]
    fn gate_refuses_at_allowance() {
        assert_eq!(
            checkout_gate(3, 3, false, true),
            Err(CheckoutDenial::AllowanceExceeded)
        );
        assert_eq!(
            checkout_gate(5, 3, false, true),
            Err(CheckoutDenial::AllowanceExceeded)
        );
    }

    #[test]
    fn gate_refuses_duplicate_holdings() {
        assert_eq!(
            checkout_gate(1, 3, true, true),
            Err(CheckoutDenial::DuplicateLoan)
        );
    }

    #[test]
    fn gate_refuses_when_no_copy_is_free() {
        assert_eq!(
            checkout_gate(0, 3, false, false),
            Err(CheckoutDenial::Unavailable)
        );
    }

    #[test]
    fn gate_checks_allowance_before_duplicates_and_stock() {
        // All three violated: the allowance wins
        assert_eq!(
            checkout_gate(3, 3, true, false),
            Err(CheckoutDenial::AllowanceExceeded)
        );
        // Duplicate beats stock
        assert_eq!(
            checkout_gate(0, 3, true, false),
            Err(CheckoutDenial::DuplicateLoan)
        );
    }
}
