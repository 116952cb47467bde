//! Domain services for Profoma.
//!
//! Services hold the business rules that operate on domain models. They are
//! pure: storage and time are supplied by the caller.

pub mod assignment;
pub mod clock;
pub mod job_lifecycle;
pub mod report_merge;

pub use assignment::normalize_employee_ids;
pub use clock::{Clock, ManualClock, SystemClock};
pub use job_lifecycle::{initial_status, status_for_action};
pub use report_merge::{merge_report, ReportState};
