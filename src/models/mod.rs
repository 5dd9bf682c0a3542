//! Data models for Folium

pub mod book;
pub mod customer;
pub mod loan;
pub mod reading_list;
pub mod review;

// Re-export commonly used types
pub use book::{Author, Book, BookCopy, BookDetails, Genre};
pub use customer::Customer;
pub use loan::{DueWarnLevel, Loan, LoanDetails, LoanEvent};
pub use reading_list::{ReadingListEntry, ReadingStatus};
pub use review::Review;
