//! HTTP route handlers.

pub mod admin_auth;
pub mod employees;
pub mod health;
pub mod intake;
pub mod jobs;
pub mod reports;
