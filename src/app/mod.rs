//! Application runner.
//!
//! [`App`] ties the configuration to the providers and wraps the whole run
//! in the last-resort error report: anything that escapes the workflow is
//! mailed to the operator once and then handed back to the caller.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::domain::Alert;
use crate::providers::mail::{MailError, Notifier, SmtpNotifier};
use crate::providers::site::{SiteSession, TeveClubSession};
use crate::services::{
    resolve_credentials, CredentialPrompt, PromptError, RunReport, Workflow, WorkflowError,
};

/// Body prefix of the last-resort report.
pub const FATAL_MESSAGE: &str = "Ismeretlen fatálas hiba történt!!!";
/// Subject of the last-resort report.
pub const FATAL_SUBJECT: &str = "Elpusztult az egész!!! ÁÁÁÁ!!!";

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credentials could not be read from the terminal.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The workflow aborted.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The run failed and so did the report about it.
    #[error("failed to report error ({original}): {source}")]
    Report {
        /// Text of the error being reported.
        original: String,
        /// Why the report could not be sent.
        #[source]
        source: MailError,
    },
}

/// Main application entry point.
pub struct App {
    config: Config,
    notifier: Arc<dyn Notifier>,
}

impl App {
    /// Creates the app with the SMTP notifier from the `[mail]` section.
    pub fn new(config: Config) -> Self {
        let notifier = Arc::new(SmtpNotifier::new(config.mail.clone()));
        Self::with_notifier(config, notifier)
    }

    /// Creates the app with a custom notifier.
    pub fn with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }

    /// Runs against the configured site.
    pub async fn run(&self, prompt: &dyn CredentialPrompt) -> Result<RunReport, AppError> {
        let session = TeveClubSession::with_base_url(self.config.site.base_url.as_str());
        self.run_with_session(prompt, session).await
    }

    /// Runs over the given session.
    ///
    /// On failure the error is mailed to the operator and returned. If that
    /// mail fails as well, [`AppError::Report`] is returned instead.
    pub async fn run_with_session<S: SiteSession>(
        &self,
        prompt: &dyn CredentialPrompt,
        session: S,
    ) -> Result<RunReport, AppError> {
        match self.execute(prompt, session).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!(error = %e, "{}", FATAL_MESSAGE);
                let alert = Alert::new(FATAL_SUBJECT, format!("{}\n\n{}", FATAL_MESSAGE, e));
                if let Err(source) = self.notifier.notify(&alert).await {
                    return Err(AppError::Report {
                        original: e.to_string(),
                        source,
                    });
                }
                Err(e)
            }
        }
    }

    async fn execute<S: SiteSession>(
        &self,
        prompt: &dyn CredentialPrompt,
        session: S,
    ) -> Result<RunReport, AppError> {
        let credentials = resolve_credentials(&self.config.teve, prompt)?;
        let mut workflow = Workflow::new(session, Arc::clone(&self.notifier), credentials);
        Ok(workflow.run().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MailSettings, SiteSettings, TeveSettings};
    use crate::providers::mail::MockNotifier;
    use crate::providers::site::SiteError;
    use crate::services::TerminalPrompt;

    fn config(base_url: &str) -> Config {
        Config {
            teve: TeveSettings {
                name: Some("Macska".to_string()),
                password: Some("SoseTudodMeg".to_string()),
            },
            mail: MailSettings {
                sender: "sender@example.com".to_string(),
                password: "secret".to_string(),
                recipient: "operator@example.com".to_string(),
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 465,
            },
            site: SiteSettings {
                base_url: base_url.to_string(),
            },
        }
    }

    /// Port 9 (discard) on localhost is not expected to accept connections.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn connection_failure_is_reported_once() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|alert| {
                alert.subject == FATAL_SUBJECT
                    && alert.message.starts_with(FATAL_MESSAGE)
                    && alert.message.contains("connection error")
            })
            .times(1)
            .returning(|_| Ok(()));
        let app = App::with_notifier(config(UNREACHABLE), Arc::new(notifier));

        let err = app.run(&TerminalPrompt).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Workflow(WorkflowError::Site(SiteError::Connection(_)))
        ));
    }

    #[tokio::test]
    async fn failed_report_wraps_original_error() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(MailError::Send("relay down".to_string())));
        let app = App::with_notifier(config(UNREACHABLE), Arc::new(notifier));

        let err = app.run(&TerminalPrompt).await.unwrap_err();

        match err {
            AppError::Report { original, source } => {
                assert!(original.contains("connection error"));
                assert!(matches!(source, MailError::Send(_)));
            }
            other => panic!("Expected Report, got {other:?}"),
        }
    }
}
