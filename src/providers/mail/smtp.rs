//! SMTP notifier.
//!
//! Every alert opens its own implicit-TLS connection to the relay, logs in
//! with the sender account and sends one plain-text message.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, Notifier, Result};
use crate::config::MailSettings;
use crate::domain::Alert;

/// Notifier backed by an authenticated SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    settings: MailSettings,
}

impl SmtpNotifier {
    /// Creates a notifier from the `[mail]` configuration.
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }

    /// Assembles the outgoing message for `alert`.
    pub fn build_message(&self, alert: &Alert) -> Result<Message> {
        let from = parse_mailbox(&self.settings.sender)?;
        let to = parse_mailbox(&self.settings.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(alert.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials =
            SmtpCredentials::new(self.settings.sender.clone(), self.settings.password.clone());

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.smtp_host)
                .map_err(|e| MailError::Relay(e.to_string()))?
                .credentials(credentials)
                .port(self.settings.smtp_port)
                .build(),
        )
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, alert: &Alert) -> Result<()> {
        let message = self.build_message(alert)?;
        let mailer = self.transport()?;

        mailer
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        tracing::info!(subject = %alert.subject, recipient = %self.settings.recipient, "Alert sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MailSettings {
        MailSettings {
            sender: "sender@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "operator@example.com".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
        }
    }

    #[test]
    fn message_carries_subject_and_addresses() {
        let notifier = SmtpNotifier::new(settings());
        let alert = Alert::new("Login alert", "Login failed").with_page("page body");

        let message = notifier.build_message(&alert).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Login alert"));
        assert!(raw.contains("sender@example.com"));
        assert!(raw.contains("operator@example.com"));
        assert!(raw.contains("Login failed"));
        assert!(raw.contains("page body"));
    }

    #[test]
    fn message_without_page_has_only_message() {
        let notifier = SmtpNotifier::new(settings());
        let alert = Alert::new("Fatal", "Something broke");

        let message = notifier.build_message(&alert).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Something broke"));
        assert!(!raw.contains("page body"));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let mut settings = settings();
        settings.recipient = "not an address".to_string();
        let notifier = SmtpNotifier::new(settings);

        let err = notifier
            .build_message(&Alert::new("subject", "message"))
            .unwrap_err();

        assert!(matches!(err, MailError::Address { ref address, .. } if address == "not an address"));
    }
}
