//! Data models for the library

pub mod book;
pub mod class;
pub mod copy;
pub mod dashboard;
pub mod import_report;
pub mod librarian;
pub mod loan;
pub mod student;

// Re-export commonly used types
pub use book::Book;
pub use class::SchoolClass;
pub use copy::{BookCopy, CopyDetails};
pub use import_report::{ImportRecord, ImportSummary};
pub use librarian::Librarian;
pub use loan::{Loan, LoanDetails, LoanSummary};
pub use student::Student;
