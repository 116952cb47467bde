//! Repository implementations for database operations.

pub mod employee;
pub mod intake;
pub mod job;
pub mod job_report;

pub use employee::{EmployeeInput, EmployeeRepository};
pub use intake::{HousingRequestInput, HousingRequestRepository, OfferRequestRepository};
pub use job::JobRepository;
pub use job_report::{JobReportRepository, SubmittedReport};
