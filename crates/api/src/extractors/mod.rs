//! Custom Axum extractors.

pub mod employee_session;
pub mod json;

pub use employee_session::EmployeeSession;
pub use json::ApiJson;
