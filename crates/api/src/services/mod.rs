//! Application services owned by the HTTP layer.

pub mod admin_auth;
pub mod email;
pub mod sessions;

pub use email::EmailService;
pub use sessions::{IssuedSession, Session, SessionStore};
