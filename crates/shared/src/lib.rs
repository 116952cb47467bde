//! Shared utilities and common types for the Profoma backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, opaque token generation)
//! - Common validation logic

pub mod crypto;
pub mod validation;
