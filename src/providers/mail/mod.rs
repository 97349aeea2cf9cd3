//! Alert delivery.
//!
//! [`Notifier`] is the seam the workflow reports failures through;
//! [`SmtpNotifier`] delivers them over an implicit-TLS SMTP relay via `lettre`.

mod smtp;
mod traits;

pub use smtp::SmtpNotifier;
#[cfg(test)]
pub use traits::MockNotifier;
pub use traits::{MailError, Notifier, Result};
