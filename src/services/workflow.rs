//! The daily routine: log in, feed, teach, log out.
//!
//! [`Workflow`] owns the site session for the whole run and guarantees that
//! it is closed on every exit path. Site-logic failures (the page says the
//! step did not work) are logged and mailed, and the run goes on. Transport
//! failures and unparseable pages abort the run and are returned to the
//! caller.
//!
//! ```text
//! NotStarted -> LoggingIn -> LoggedIn -> Feeding -> Teaching -> Taught -> LoggedOut
//!      \____________\____________\__________\__________\__________\----> Error
//! ```

use std::sync::Arc;

use thiserror::Error;

use super::classifier;
use super::feeding::{FeedAmounts, FeedParseError};
use crate::domain::{Alert, Credentials, FormData};
use crate::providers::mail::{MailError, Notifier};
use crate::providers::site::{links, SiteError, SiteSession};

/// Login form field carrying the camel name.
pub const NAME_FIELD: &str = "tevenev";
/// Login form field carrying the password.
pub const PASSWORD_FIELD: &str = "pass";

/// Alert texts for site-logic failures.
pub mod alerts {
    /// Login rejected.
    pub const LOGIN_FAILED: &str = "Nem sikerült bejelentkezni!?";
    /// Subject of the login alert.
    pub const LOGIN_FAILED_SUBJECT: &str = "Automatikus belépési hiba!!!";
    /// Feeding did not go through.
    pub const FEED_FAILED: &str = "Nem sikerült az etetés!";
    /// Subject of the feeding alert.
    pub const FEED_FAILED_SUBJECT: &str = "Automatikus etetési kalamajka!";
    /// Teaching did not go through.
    pub const TEACH_FAILED: &str = "Nem sikerült a tanítás!";
    /// Subject of the teaching alert.
    pub const TEACH_FAILED_SUBJECT: &str = "Automatikus tanítási fennforgattyú!";
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The site could not be reached or answered with an error status.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// An alert could not be delivered.
    #[error(transparent)]
    Mail(#[from] MailError),

    /// The pet page could not be read.
    #[error(transparent)]
    Feed(#[from] FeedParseError),
}

/// Where the run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    /// Nothing happened yet.
    #[default]
    NotStarted,
    /// Session opened, login form being submitted.
    LoggingIn,
    /// Login request completed.
    LoggedIn,
    /// Feeding step in progress.
    Feeding,
    /// Teaching request in flight.
    Teaching,
    /// Teaching step completed.
    Taught,
    /// Logged out and session closed.
    LoggedOut,
    /// The run was aborted by an error.
    Error,
}

/// Result of the login step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The site accepted the credentials.
    Accepted,
    /// The site showed its failure notice; an alert was sent.
    Rejected,
}

/// Result of the feeding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Nothing offered; no feed request was sent.
    NotHungry,
    /// The amounts were submitted and accepted.
    Fed(FeedAmounts),
    /// The amounts were submitted but the site still offers feeding.
    Failed(FeedAmounts),
}

/// Result of the teaching step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachOutcome {
    /// The site shows the "already taught today" notice.
    Taught,
    /// The notice is missing; an alert was sent.
    Failed,
}

/// Step outcomes of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Login outcome, if the login request completed.
    pub login: Option<LoginOutcome>,
    /// Feeding outcome, if the step completed.
    pub feed: Option<FeedOutcome>,
    /// Teaching outcome, if the step completed.
    pub teach: Option<TeachOutcome>,
    /// Whether the logout request was sent successfully.
    pub logged_out: bool,
    /// Number of site-logic alerts sent.
    pub alerts_sent: usize,
}

/// Drives one login/feed/teach/logout cycle over an owned session.
pub struct Workflow<S: SiteSession> {
    session: S,
    notifier: Arc<dyn Notifier>,
    credentials: Credentials,
    state: WorkflowState,
    logged_in: bool,
}

impl<S: SiteSession> Workflow<S> {
    /// Creates a workflow; nothing is sent until [`run`](Self::run).
    pub fn new(session: S, notifier: Arc<dyn Notifier>, credentials: Credentials) -> Self {
        Self {
            session,
            notifier,
            credentials,
            state: WorkflowState::NotStarted,
            logged_in: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Whether the login request completed and no logout happened since.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Gives the session back, e.g. for inspection after a run.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Runs the whole cycle.
    ///
    /// The session is closed before this returns, whatever the outcome. When
    /// a step fails, that error is returned even if logging out fails too.
    pub async fn run(&mut self) -> Result<RunReport, WorkflowError> {
        let mut report = RunReport::default();

        let result = self.run_steps(&mut report).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, state = ?self.state, "Workflow aborted");
            self.state = WorkflowState::Error;
        }

        let exit = self.exit(&mut report).await;
        result?;
        exit?;
        Ok(report)
    }

    async fn run_steps(&mut self, report: &mut RunReport) -> Result<(), WorkflowError> {
        let login = self.login(report).await?;
        report.login = Some(login);
        let feed = self.feed(report).await?;
        report.feed = Some(feed);
        let teach = self.teach(report).await?;
        report.teach = Some(teach);
        Ok(())
    }

    async fn login(&mut self, report: &mut RunReport) -> Result<LoginOutcome, WorkflowError> {
        self.state = WorkflowState::LoggingIn;
        self.session.open()?;

        tracing::info!(name = %self.credentials.name, "Bejelentkezés...");
        let form = FormData::new()
            .field("x", "26")
            .field("y", "22")
            .field("login", "Gyere!")
            .field(NAME_FIELD, self.credentials.name.as_str())
            .field(PASSWORD_FIELD, self.credentials.password.as_str());
        let page = self.session.post(links::HOME, &form).await?;

        let outcome = if classifier::login_succeeded(&page.text) {
            tracing::info!("Bent vagyunk! :)");
            LoginOutcome::Accepted
        } else {
            tracing::warn!(status = page.status, "{}", alerts::LOGIN_FAILED);
            self.alert(
                report,
                Alert::new(alerts::LOGIN_FAILED_SUBJECT, alerts::LOGIN_FAILED).with_page(page.text),
            )
            .await?;
            LoginOutcome::Rejected
        };

        // A rejected login still counts: the site session exists and gets a logout.
        self.logged_in = true;
        self.state = WorkflowState::LoggedIn;
        Ok(outcome)
    }

    async fn feed(&mut self, report: &mut RunReport) -> Result<FeedOutcome, WorkflowError> {
        self.state = WorkflowState::Feeding;

        let page = self.session.get(links::PET_PAGE).await?;
        let amounts = FeedAmounts::parse(&page.text)?;

        if amounts.is_empty() {
            tracing::info!("Etetés... OK (nem éhes és nem is szomjas)");
            return Ok(FeedOutcome::NotHungry);
        }

        let page = self.session.post(links::PET_PAGE, &amounts.to_form()).await?;
        if classifier::feed_succeeded(&page.text) {
            tracing::info!(food = amounts.food, water = amounts.water, "Etetés... OK");
            Ok(FeedOutcome::Fed(amounts))
        } else {
            tracing::error!(status = page.status, page = %page.text, "Etetés... ERROR");
            self.alert(
                report,
                Alert::new(alerts::FEED_FAILED_SUBJECT, alerts::FEED_FAILED).with_page(page.text),
            )
            .await?;
            Ok(FeedOutcome::Failed(amounts))
        }
    }

    async fn teach(&mut self, report: &mut RunReport) -> Result<TeachOutcome, WorkflowError> {
        self.state = WorkflowState::Teaching;

        let form = FormData::new()
            .field("farmdoit", "tanit")
            .field("learn", "Tanulj teve!");
        let page = self.session.post(links::TEACH_PAGE, &form).await?;

        let outcome = if classifier::teach_succeeded(&page.text) {
            tracing::info!("Tanítás... OK");
            TeachOutcome::Taught
        } else {
            tracing::error!(status = page.status, page = %page.text, "Tanítás... ERROR");
            self.alert(
                report,
                Alert::new(alerts::TEACH_FAILED_SUBJECT, alerts::TEACH_FAILED).with_page(page.text),
            )
            .await?;
            TeachOutcome::Failed
        };

        self.state = WorkflowState::Taught;
        Ok(outcome)
    }

    async fn exit(&mut self, report: &mut RunReport) -> Result<(), SiteError> {
        let logout = if self.logged_in {
            match self.session.get(links::LOGOUT_PAGE).await {
                Ok(_) => {
                    self.logged_in = false;
                    report.logged_out = true;
                    tracing::info!("Kijelentkeztem! :)");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(error = %e, "Logout failed");
                    Err(e)
                }
            }
        } else {
            Ok(())
        };

        self.session.close();

        match (&logout, self.state) {
            (Ok(()), WorkflowState::Error) => {}
            (Ok(()), _) => self.state = WorkflowState::LoggedOut,
            (Err(_), _) => self.state = WorkflowState::Error,
        }
        logout
    }

    async fn alert(&self, report: &mut RunReport, alert: Alert) -> Result<(), MailError> {
        self.notifier.notify(&alert).await?;
        report.alerts_sent += 1;
        Ok(())
    }
}
