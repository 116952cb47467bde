//! Entity definitions (database row mappings).

pub mod employee;
pub mod intake;
pub mod job;
pub mod job_report;

pub use employee::EmployeeEntity;
pub use intake::{HousingRequestEntity, OfferRequestEntity};
pub use job::{JobEntity, JobWithAssigneesEntity};
pub use job_report::{JobReportEntity, JobReportWithEmployeeEntity};
