//! Admin credential resolution.

use crate::config::AdminConfig;
use shared::crypto::{constant_time_eq, sha256_hex};

/// Returns the token admin requests must present, or `None` when admin auth
/// is not configured.
///
/// An explicit token wins; otherwise the token is derived from the
/// configured username and password.
pub fn expected_admin_token(config: &AdminConfig) -> Option<String> {
    if !config.token.is_empty() {
        return Some(config.token.clone());
    }
    if config.password.is_empty() {
        return None;
    }
    Some(sha256_hex(&format!("{}:{}", config.username, config.password)))
}

/// Checks a username and password against the configured admin credentials.
pub fn verify_admin_credentials(config: &AdminConfig, username: &str, password: &str) -> bool {
    !config.password.is_empty()
        && constant_time_eq(username, &config.username)
        && constant_time_eq(password, &config.password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str, password: &str) -> AdminConfig {
        AdminConfig {
            token: token.to_string(),
            password: password.to_string(),
            ..AdminConfig::default()
        }
    }

    #[test]
    fn test_explicit_token_wins() {
        assert_eq!(
            expected_admin_token(&config("vast-token", "geheim")),
            Some("vast-token".to_string())
        );
    }

    #[test]
    fn test_token_derived_from_credentials() {
        assert_eq!(
            expected_admin_token(&config("", "geheim")),
            Some(sha256_hex("admin:geheim"))
        );
    }

    #[test]
    fn test_unconfigured() {
        assert_eq!(expected_admin_token(&config("", "")), None);
    }

    #[test]
    fn test_verify_admin_credentials() {
        let cfg = config("", "geheim");
        assert!(verify_admin_credentials(&cfg, "admin", "geheim"));
        assert!(!verify_admin_credentials(&cfg, "admin", "Geheim"));
        assert!(!verify_admin_credentials(&cfg, "root", "geheim"));
        assert!(!verify_admin_credentials(&config("t", ""), "admin", ""));
    }
}
