//! Domain layer for the Profoma backend.
//!
//! This crate contains:
//! - Domain models (Employee, Job, JobReport, intake requests)
//! - Business logic services (report merge, job lifecycle, clock)

pub mod models;
pub mod services;
