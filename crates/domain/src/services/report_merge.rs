//! Report merge-upsert.
//!
//! There is one report per (job, employee). The first action creates it; later
//! actions are merged field by field:
//!
//! - `started_at` / `finished_at` are set once, by the matching action, and
//!   never moved afterwards.
//! - Photo lists are replaced when the submission carries a non-empty list and
//!   kept otherwise. Submissions never append.
//! - Comments are replaced when the submission carries non-empty text.
//!
//! Resubmitting the same action is idempotent for the timestamps but not for
//! photo lists: a different non-empty list always overwrites.

use chrono::{DateTime, Utc};

use crate::models::{JobReport, ReportAction, ReportSubmission};

/// The mutable part of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportState {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub before_photos: Vec<String>,
    pub after_photos: Vec<String>,
    pub comments: String,
}

impl From<&JobReport> for ReportState {
    fn from(report: &JobReport) -> Self {
        Self {
            started_at: report.started_at,
            finished_at: report.finished_at,
            before_photos: report.before_photos.clone(),
            after_photos: report.after_photos.clone(),
            comments: report.comments.clone(),
        }
    }
}

/// Computes the report state after applying `submission` at time `now`.
///
/// `existing` is `None` when no report exists yet for the pair.
pub fn merge_report(
    existing: Option<&ReportState>,
    submission: &ReportSubmission,
    now: DateTime<Utc>,
) -> ReportState {
    let stamp = |action: ReportAction| (submission.action == action).then_some(now);

    match existing {
        None => ReportState {
            started_at: stamp(ReportAction::Start),
            finished_at: stamp(ReportAction::Finish),
            before_photos: submission.before_photos.clone(),
            after_photos: submission.after_photos.clone(),
            comments: submission.comments.clone(),
        },
        Some(current) => ReportState {
            started_at: current.started_at.or_else(|| stamp(ReportAction::Start)),
            finished_at: current.finished_at.or_else(|| stamp(ReportAction::Finish)),
            before_photos: replace_if_present(&current.before_photos, &submission.before_photos),
            after_photos: replace_if_present(&current.after_photos, &submission.after_photos),
            comments: if submission.comments.trim().is_empty() {
                current.comments.clone()
            } else {
                submission.comments.clone()
            },
        },
    }
}

fn replace_if_present(stored: &[String], submitted: &[String]) -> Vec<String> {
    if submitted.is_empty() {
        stored.to_vec()
    } else {
        submitted.to_vec()
    }
}
