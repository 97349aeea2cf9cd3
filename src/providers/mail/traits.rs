//! Notifier trait definition.

use async_trait::async_trait;

use crate::domain::Alert;

/// Result type alias for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Errors that can occur while sending an alert.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// A configured address could not be parsed.
    #[error("invalid address {address}: {reason}")]
    Address {
        /// The offending address.
        address: String,
        /// Parser message.
        reason: String,
    },

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The relay could not be set up.
    #[error("SMTP relay error: {0}")]
    Relay(String),

    /// The relay rejected or failed the delivery.
    #[error("SMTP send failed: {0}")]
    Send(String),
}

/// Sends operator alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `alert`. Failures are returned, never swallowed.
    async fn notify(&self, alert: &Alert) -> Result<()>;
}
