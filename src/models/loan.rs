//! Loan model and lifecycle predicates.
//!
//! A loan links one copy to one customer for a bounded period. Rows are
//! never deleted; a returned loan stays as historical record with its
//! `returned` flag set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub customer_id: i32,
    pub copy_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub returned: bool,
    pub nb_renewals: i16,
    pub created_at: DateTime<Utc>,
}

/// Loan joined with its book, for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub customer_id: i32,
    pub isbn: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub returned: bool,
    pub nb_renewals: i16,
    pub is_overdue: bool,
    pub warn_level: DueWarnLevel,
}

/// How close a loan is to its due date, for UI display only.
/// Tiers follow the fraction of the loan duration remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DueWarnLevel {
    /// At least half the loan duration remains
    Relaxed,
    /// At least a third remains
    Approaching,
    /// Due within a third of the duration
    Imminent,
    /// Past the due date
    Overdue,
}

/// Lifecycle events emitted by loan transitions and consumed by the
/// reading-list updater.
#[derive(Debug, Clone)]
pub enum LoanEvent {
    Created { customer_id: i32, isbn: String },
    Returned { customer_id: i32, isbn: String },
}

impl Loan {
    /// Overdue means unreturned with a due date at or before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.returned && self.end_date <= today
    }

    /// Days until the due date; negative once overdue.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }

    /// A loan is renewable while unreturned and due within the renewal
    /// window. Overdue loans are inside the window and stay renewable.
    pub fn is_renewable(&self, renew_window_days: i64, today: NaiveDate) -> bool {
        !self.returned && self.days_remaining(today) <= renew_window_days
    }

    /// Compute the due-date warning tier from the fraction of the
    /// configured loan duration remaining.
    pub fn warn_level(&self, duration_days: i64, today: NaiveDate) -> DueWarnLevel {
        if self.is_overdue(today) {
            return DueWarnLevel::Overdue;
        }
        let remaining = self.days_remaining(today) as f64;
        let fraction = remaining / duration_days.max(1) as f64;
        if fraction >= 0.5 {
            DueWarnLevel::Relaxed
        } else if fraction >= 1.0 / 3.0 {
            DueWarnLevel::Approaching
        } else {
            DueWarnLevel::Imminent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn loan(start: NaiveDate, end: NaiveDate, returned: bool) -> Loan {
        Loan {
            id: 1,
            customer_id: 1,
            copy_id: 1,
            start_date: start,
            end_date: end,
            returned,
            nb_renewals: 0,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn overdue_when_end_date_passed() {
        let t = today();
        assert!(loan(t - Duration::days(14), t - Duration::days(7), false).is_overdue(t));
        // Due today counts as overdue
        assert!(loan(t - Duration::days(7), t, false).is_overdue(t));
        assert!(!loan(t, t + Duration::days(7), false).is_overdue(t));
        // Returned loans are never overdue
        assert!(!loan(t - Duration::days(14), t - Duration::days(7), true).is_overdue(t));
    }

    #[test]
    fn renewable_only_within_window() {
        let t = today();
        // Due in 10 days, window of 2: too early
        assert!(!loan(t, t + Duration::days(10), false).is_renewable(2, t));
        // Due in 1 day: renewable
        assert!(loan(t - Duration::days(6), t + Duration::days(1), false).is_renewable(2, t));
        // Overdue loans stay renewable
        assert!(loan(t - Duration::days(14), t - Duration::days(3), false).is_renewable(2, t));
        // Returned loans never are
        assert!(!loan(t - Duration::days(6), t + Duration::days(1), true).is_renewable(2, t));
    }

    #[test]
    fn warn_level_tiers() {
        let t = today();
        let duration = 7;
        let by_remaining =
            |days: i64| loan(t, t + Duration::days(days), false).warn_level(duration, t);

        assert_eq!(by_remaining(7), DueWarnLevel::Relaxed);
        assert_eq!(by_remaining(4), DueWarnLevel::Relaxed); // 4/7 > 0.5
        assert_eq!(by_remaining(3), DueWarnLevel::Approaching); // 3/7 > 1/3
        assert_eq!(by_remaining(1), DueWarnLevel::Imminent);
        assert_eq!(by_remaining(0), DueWarnLevel::Overdue);
        assert_eq!(by_remaining(-2), DueWarnLevel::Overdue);
    }
}
