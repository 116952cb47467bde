//! In-memory employee session store.
//!
//! Tokens are opaque random strings handed to the client once; the store only
//! keeps their SHA-256 digest. Sessions expire after a fixed TTL measured on
//! the injected clock.

use chrono::{DateTime, Duration, Utc};
use domain::models::Employee;
use domain::services::Clock;
use shared::crypto::{generate_session_token, sha256_hex};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// An authenticated employee session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued session together with its plaintext token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Issues a new session for the employee.
    pub fn issue(&self, employee: &Employee) -> IssuedSession {
        let token = generate_session_token();
        let issued_at = self.clock.now();
        let session = Session {
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            issued_at,
            expires_at: issued_at + self.ttl,
        };

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sha256_hex(&token), session.clone());

        IssuedSession { token, session }
    }

    /// Resolves a token to its live session. Expired sessions are evicted.
    pub fn lookup(&self, token: &str) -> Option<Session> {
        let key = sha256_hex(token);
        let now = self.clock.now();

        {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            match sessions.get(&key) {
                None => return None,
                Some(session) if session.expires_at > now => return Some(session.clone()),
                Some(_) => {}
            }
        }

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        None
    }

    /// Revokes a session. Returns whether the token was known.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&sha256_hex(token))
            .is_some()
    }

    /// Revokes every session of an employee. Returns how many were removed.
    pub fn revoke_employee(&self, employee_id: Uuid) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| session.employee_id != employee_id);
        before - sessions.len()
    }

    /// Drops every expired session and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
