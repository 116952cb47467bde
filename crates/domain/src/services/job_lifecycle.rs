//! Job lifecycle rules.
//!
//! After creation a job's status is driven by report actions. The status is a
//! function of the latest action alone: any assignee starting marks the job
//! started, and any assignee finishing marks it completed, regardless of what
//! the other assignees have reported.

use crate::models::{JobStatus, ReportAction};

/// Status a job takes when it is created.
pub fn initial_status(requested: Option<JobStatus>) -> JobStatus {
    requested.unwrap_or_default()
}

/// Status a job takes after a report action has been merged.
pub fn status_for_action(action: ReportAction) -> JobStatus {
    match action {
        ReportAction::Start => JobStatus::Started,
        ReportAction::Finish => JobStatus::Completed,
    }
}
