//! Job report domain models.
//!
//! A report is the single record of one employee's activity on one job. It is
//! created by the first `start` or `finish` action and merged on every later
//! action; see [`crate::services::report_merge`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Maximum number of photo references accepted per list in one submission.
pub const MAX_PHOTOS_PER_LIST: u64 = 50;

/// Report action submitted from the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Start,
    Finish,
}

impl ReportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportAction::Start => "start",
            ReportAction::Finish => "finish",
        }
    }
}

impl fmt::Display for ReportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ReportAction::Start),
            "finish" => Ok(ReportAction::Finish),
            _ => Err(format!(
                "Invalid report action: {}. Must be one of: start, finish",
                s
            )),
        }
    }
}

/// Stored report for a (job, employee) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReport {
    pub id: Uuid,
    pub job_id: Uuid,
    pub employee_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub before_photos: Vec<String>,
    pub after_photos: Vec<String>,
    pub comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report joined with the reporting employee's display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReportWithEmployee {
    #[serde(flatten)]
    pub report: JobReport,
    pub employee_name: String,
}

/// Request payload for submitting a report action.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitReportRequest {
    #[validate(required(message = "jobId is required"))]
    pub job_id: Option<Uuid>,

    #[validate(required(message = "employeeId is required"))]
    pub employee_id: Option<Uuid>,

    #[validate(
        required(message = "action is required"),
        custom(function = "validate_action")
    )]
    pub action: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "comments must be at most 5000 characters"))]
    pub comments: String,

    #[serde(default)]
    #[validate(length(max = 50, message = "too many before photos"))]
    pub before_photos: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "too many after photos"))]
    pub after_photos: Vec<String>,
}

fn validate_action(action: &str) -> Result<(), ValidationError> {
    action.parse::<ReportAction>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("action");
        err.message = Some("action must be 'start' or 'finish'".into());
        err
    })
}

/// A validated report action ready to be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSubmission {
    pub job_id: Uuid,
    pub employee_id: Uuid,
    pub action: ReportAction,
    pub comments: String,
    pub before_photos: Vec<String>,
    pub after_photos: Vec<String>,
}

impl TryFrom<SubmitReportRequest> for ReportSubmission {
    type Error = ValidationErrors;

    fn try_from(request: SubmitReportRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let job_id = request
            .job_id
            .ok_or_else(|| super::field_error("job_id", "required", "jobId is required"))?;
        let employee_id = request.employee_id.ok_or_else(|| {
            super::field_error("employee_id", "required", "employeeId is required")
        })?;
        let action = request
            .action
            .as_deref()
            .and_then(|a| a.parse::<ReportAction>().ok())
            .ok_or_else(|| {
                super::field_error("action", "action", "action must be 'start' or 'finish'")
            })?;

        Ok(ReportSubmission {
            job_id,
            employee_id,
            action,
            comments: if request.comments.trim().is_empty() {
                String::new()
            } else {
                request.comments
            },
            before_photos: non_blank(request.before_photos),
            after_photos: non_blank(request.after_photos),
        })
    }
}

fn non_blank(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SubmitReportRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_report_action_parsing() {
        assert_eq!("start".parse::<ReportAction>().unwrap(), ReportAction::Start);
        assert_eq!("finish".parse::<ReportAction>().unwrap(), ReportAction::Finish);
        assert!("Start".parse::<ReportAction>().is_err());
        assert!("pause".parse::<ReportAction>().is_err());
        assert_eq!(ReportAction::Finish.to_string(), "finish");
    }

    #[test]
    fn test_submission_valid() {
        let job = Uuid::new_v4();
        let emp = Uuid::new_v4();
        let json = format!(
            r#"{{"jobId":"{job}","employeeId":"{emp}","action":"start","comments":"onderweg",
                "beforePhotos":["https://img/1.jpg"]}}"#
        );
        let sub = ReportSubmission::try_from(parse(&json)).unwrap();
        assert_eq!(sub.job_id, job);
        assert_eq!(sub.employee_id, emp);
        assert_eq!(sub.action, ReportAction::Start);
        assert_eq!(sub.comments, "onderweg");
        assert_eq!(sub.before_photos, vec!["https://img/1.jpg".to_string()]);
        assert!(sub.after_photos.is_empty());
    }

    #[test]
    fn test_submission_only_job_id_fails() {
        let json = format!(r#"{{"jobId":"{}"}}"#, Uuid::new_v4());
        let errors = ReportSubmission::try_from(parse(&json)).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("employee_id"));
        assert!(fields.contains_key("action"));
    }

    #[test]
    fn test_submission_unknown_action_fails() {
        let json = format!(
            r#"{{"jobId":"{}","employeeId":"{}","action":"pause"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let errors = ReportSubmission::try_from(parse(&json)).unwrap_err();
        assert!(errors.field_errors().contains_key("action"));
    }

    #[test]
    fn test_submission_drops_blank_photo_entries() {
        let json = format!(
            r#"{{"jobId":"{}","employeeId":"{}","action":"finish","afterPhotos":["", " a ", "  "]}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let sub = ReportSubmission::try_from(parse(&json)).unwrap();
        assert_eq!(sub.after_photos, vec!["a".to_string()]);
    }

    #[test]
    fn test_submission_blank_comments_count_as_empty() {
        let json = format!(
            r#"{{"jobId":"{}","employeeId":"{}","action":"start","comments":"  \n "}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let sub = ReportSubmission::try_from(parse(&json)).unwrap();
        assert_eq!(sub.comments, "");
    }

    #[test]
    fn test_submission_too_many_photos() {
        let photos: Vec<String> = (0..=MAX_PHOTOS_PER_LIST).map(|i| format!("p{i}")).collect();
        let request = SubmitReportRequest {
            job_id: Some(Uuid::new_v4()),
            employee_id: Some(Uuid::new_v4()),
            action: Some("start".to_string()),
            before_photos: photos,
            ..Default::default()
        };
        assert!(ReportSubmission::try_from(request).is_err());
    }

    #[test]
    fn test_submission_rejects_unknown_fields() {
        let result: Result<SubmitReportRequest, _> =
            serde_json::from_str(r#"{"action":"start","photos":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_with_employee_serialization() {
        let now = Utc::now();
        let row = JobReportWithEmployee {
            report: JobReport {
                id: Uuid::nil(),
                job_id: Uuid::nil(),
                employee_id: Uuid::nil(),
                started_at: Some(now),
                finished_at: None,
                before_photos: vec![],
                after_photos: vec![],
                comments: "klaar".to_string(),
                created_at: now,
                updated_at: now,
            },
            employee_name: "Anna".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["employeeName"], "Anna");
        assert!(json["finishedAt"].is_null());
        assert_eq!(json["comments"], "klaar");
    }
}
