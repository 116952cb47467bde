//! Email service for intake notifications.
//!
//! Providers:
//! - `console`: logs the message (development)
//! - `smtp`: logs the SMTP envelope; no SMTP client is bundled
//!
//! Notifications are fire-and-forget: a failure is logged and never reaches
//! the request that triggered it.

use crate::config::EmailConfig;
use domain::models::HousingRequest;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
}

/// Email service for transactional mail.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        if message.to.trim().is_empty() {
            return Err(EmailError::NotConfigured("no recipient".to_string()));
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message),
            "smtp" => self.send_smtp(message),
            provider => Err(EmailError::NotConfigured(format!(
                "unknown provider '{}'",
                provider
            ))),
        }
    }

    /// Queue the "new housing request" notification without waiting for it.
    pub fn notify_housing_request(&self, request: &HousingRequest) {
        let service = self.clone();
        let message = housing_request_message(&self.config.notify_to, request);
        let request_id = request.id;

        tokio::spawn(async move {
            match service.send(message).await {
                Ok(()) => debug!(request_id = %request_id, "Intake notification handled"),
                Err(e) => error!(
                    request_id = %request_id,
                    error = %e,
                    "Failed to send intake notification"
                ),
            }
        });
    }

    fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            "Email (console provider)"
        );
        info!(body_text = %message.body_text, "Email body (plain text)");
        if let Some(html) = &message.body_html {
            debug!(body_html_length = html.len(), "Email body (HTML)");
        }
        Ok(())
    }

    fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.smtp_host.is_empty() {
            return Err(EmailError::NotConfigured("smtp_host is empty".to_string()));
        }

        warn!(
            provider = "smtp",
            host = %self.config.smtp_host,
            port = self.config.smtp_port,
            "SMTP transport is not bundled; logging envelope only"
        );
        info!(
            to = %message.to,
            from = %self.config.sender_email,
            subject = %message.subject,
            "Email envelope (smtp provider)"
        );
        Ok(())
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Builds the notification for a new housing request.
pub fn housing_request_message(to: &str, request: &HousingRequest) -> EmailMessage {
    let company = if request.company.trim().is_empty() {
        "Onbekend bedrijf"
    } else {
        request.company.as_str()
    };
    let total_persons = if request.total_persons > 0 {
        request.total_persons.to_string()
    } else {
        "-".to_string()
    };

    let rows = [
        ("Bedrijf", or_dash(&request.company)),
        ("Contactpersoon", or_dash(&request.contact_person)),
        ("E-mail", or_dash(&request.email)),
        ("Telefoon", or_dash(&request.phone)),
        ("Regio", or_dash(&request.region)),
        ("Check-in", or_dash(&request.checkin)),
        ("Duur", or_dash(&request.duration)),
        ("Aantal personen", total_persons.as_str()),
        ("Personen per kamer", or_dash(&request.persons_per_room)),
        ("Budget p.p.p.w.", or_dash(&request.budget)),
        ("Inclusief", or_dash(&request.included)),
        ("Opmerkingen", or_dash(&request.notes)),
    ];

    let mut body_text = String::from("Nieuwe aanvraag personeelshuisvesting\n\n");
    let mut body_html = String::from("<h2>Nieuwe aanvraag personeelshuisvesting</h2>\n");
    for (label, value) in rows {
        body_text.push_str(&format!("{}: {}\n", label, value));
        body_html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            label,
            escape_html(value).replace('\n', "<br>")
        ));
    }
    body_text.push_str("\nDeze mail is automatisch verstuurd door profoma-cms.");
    body_html.push_str("<hr>\n<p>Deze mail is automatisch verstuurd door profoma-cms.</p>");

    EmailMessage {
        to: to.to_string(),
        subject: format!("Nieuwe aanvraag personeelshuisvesting - {}", company),
        body_text,
        body_html: Some(body_html),
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::IntakeStatus;
    use uuid::Uuid;

    fn request() -> HousingRequest {
        HousingRequest {
            id: Uuid::new_v4(),
            company: "Acme <BV>".to_string(),
            contact_person: "Jan".to_string(),
            email: String::new(),
            phone: String::new(),
            region: "Utrecht".to_string(),
            checkin: "2025-07-01".to_string(),
            duration: "3 maanden".to_string(),
            total_persons: 12,
            persons_per_room: "2".to_string(),
            budget: String::new(),
            included: "wifi, linnen".to_string(),
            notes: "regel 1\nregel 2".to_string(),
            status: IntakeStatus::New,
            created_at: Utc::now(),
        }
    }

    fn config(enabled: bool, provider: &str) -> EmailConfig {
        EmailConfig {
            enabled,
            provider: provider.to_string(),
            ..EmailConfig::default()
        }
    }

    #[test]
    fn test_housing_request_message() {
        let msg = housing_request_message("kantoor@profoma.nl", &request());
        assert_eq!(msg.to, "kantoor@profoma.nl");
        assert_eq!(
            msg.subject,
            "Nieuwe aanvraag personeelshuisvesting - Acme <BV>"
        );
        assert!(msg.body_text.contains("Aantal personen: 12"));
        assert!(msg.body_text.contains("E-mail: -"));
        let html = msg.body_html.unwrap();
        assert!(html.contains("Acme &lt;BV&gt;"));
        assert!(html.contains("regel 1<br>regel 2"));
    }

    #[test]
    fn test_housing_request_message_unknown_company() {
        let mut req = request();
        req.company = "  ".to_string();
        req.total_persons = 0;
        let msg = housing_request_message("x@y.nl", &req);
        assert!(msg.subject.ends_with("Onbekend bedrijf"));
        assert!(msg.body_text.contains("Aantal personen: -"));
    }

    #[tokio::test]
    async fn test_send_disabled_is_ok() {
        let service = EmailService::new(config(false, "console"));
        assert!(!service.is_enabled());
        let msg = housing_request_message("", &request());
        assert!(service.send(msg).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_console() {
        let service = EmailService::new(config(true, "console"));
        let msg = housing_request_message("kantoor@profoma.nl", &request());
        assert!(service.send(msg).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_without_recipient_fails() {
        let service = EmailService::new(config(true, "console"));
        let msg = housing_request_message("", &request());
        assert!(matches!(
            service.send(msg).await,
            Err(EmailError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_send_smtp_requires_host() {
        let service = EmailService::new(config(true, "smtp"));
        let msg = housing_request_message("kantoor@profoma.nl", &request());
        assert!(service.send(msg).await.is_err());
    }

    #[tokio::test]
    async fn test_notify_does_not_block_or_panic() {
        let service = EmailService::new(config(true, "smtp"));
        service.notify_housing_request(&request());
        tokio::task::yield_now().await;
    }
}
