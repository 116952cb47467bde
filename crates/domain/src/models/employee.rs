//! Employee domain models.
//!
//! Employees authenticate with their name and a login code. The login code is
//! a shared PIN compared as plaintext; it is not a security boundary and is
//! never serialized back to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_not_blank;
use uuid::Uuid;
use validator::Validate;

/// Represents a staff member who can be assigned to jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating an employee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Role must be at most 100 characters"))]
    pub role: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 64, message = "Login code must be at most 64 characters")
    )]
    pub login_code: String,
}

/// Request payload for employee login.
///
/// Lengths are capped at what an employee record can hold, so oversized
/// names are refused before they reach the login limiter.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeLoginRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Login code must be at most 64 characters"))]
    pub code: String,
}

/// Result of checking a name and login code.
///
/// A failed match is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Employee),
    NoMatch,
}

impl From<Option<Employee>> for LoginOutcome {
    fn from(employee: Option<Employee>) -> Self {
        match employee {
            Some(employee) if employee.active => LoginOutcome::Authenticated(employee),
            _ => LoginOutcome::NoMatch,
        }
    }
}

/// Response payload for employee login.
///
/// Wrong credentials produce `success: false` with an `error` code instead of
/// an error status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmployeeLoginResponse {
    pub fn granted(employee: Employee, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            employee: Some(employee),
            token: Some(token),
            expires_at: Some(expires_at),
            error: None,
        }
    }

    pub fn denied() -> Self {
        Self {
            success: false,
            employee: None,
            token: None,
            expires_at: None,
            error: Some("invalid_credentials".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(active: bool) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Sanne".to_string(),
            role: "schoonmaak".to_string(),
            phone: String::new(),
            email: String::new(),
            active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_employee_request_valid() {
        let json = r#"{"name":"Sanne","role":"schoonmaak","loginCode":"1234"}"#;
        let req: CreateEmployeeRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.login_code, "1234");
        assert_eq!(req.phone, "");
    }

    #[test]
    fn test_create_employee_request_missing_name() {
        let req: CreateEmployeeRequest = serde_json::from_str(r#"{"loginCode":"1234"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_employee_request_blank_login_code() {
        let req: CreateEmployeeRequest =
            serde_json::from_str(r#"{"name":"Sanne","loginCode":"  "}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("login_code"));
    }

    #[test]
    fn test_create_employee_request_rejects_unknown_fields() {
        let result: Result<CreateEmployeeRequest, _> =
            serde_json::from_str(r#"{"name":"Sanne","loginCode":"1","admin":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_length_caps() {
        let req: EmployeeLoginRequest =
            serde_json::from_str(r#"{"name":"Anna","code":"1234"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req = EmployeeLoginRequest {
            name: "x".repeat(101),
            code: "1234".to_string(),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("name"));

        let req = EmployeeLoginRequest {
            name: "Anna".to_string(),
            code: "9".repeat(65),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("code"));
    }

    #[test]
    fn test_login_outcome_from_option() {
        let active = employee(true);
        assert_eq!(
            LoginOutcome::from(Some(active.clone())),
            LoginOutcome::Authenticated(active)
        );
        assert_eq!(LoginOutcome::from(None), LoginOutcome::NoMatch);
    }

    #[test]
    fn test_login_outcome_inactive_is_no_match() {
        assert_eq!(LoginOutcome::from(Some(employee(false))), LoginOutcome::NoMatch);
    }

    #[test]
    fn test_login_response_denied_shape() {
        let json = serde_json::to_value(EmployeeLoginResponse::denied()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "invalid_credentials");
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_login_response_granted_shape() {
        let json = serde_json::to_value(EmployeeLoginResponse::granted(
            employee(true),
            "tok".to_string(),
            Utc::now(),
        ))
        .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["token"], "tok");
        assert!(json.get("expiresAt").is_some());
        assert!(json["employee"].get("loginCode").is_none());
    }
}
