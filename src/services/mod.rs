//! Business services layer.
//!
//! Services sit between the entry point and the providers:
//!
//! ```text
//!   App (runner, top-level error report)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//!   Providers (site session, SMTP notifier)
//! ```
//!
//! - [`classifier`]: pure success checks on page text
//! - [`feeding`]: reading the feed controls of the pet page
//! - [`prompt`]: terminal fallback for missing credentials
//! - [`Workflow`]: the login/feed/teach/logout cycle

pub mod classifier;
pub mod feeding;
pub mod prompt;
mod workflow;

pub use feeding::{FeedAmounts, FeedParseError};
pub use prompt::{resolve_credentials, CredentialPrompt, PromptError, TerminalPrompt};
pub use workflow::{
    alerts, FeedOutcome, LoginOutcome, RunReport, TeachOutcome, Workflow, WorkflowError,
    WorkflowState, NAME_FIELD, PASSWORD_FIELD,
};
