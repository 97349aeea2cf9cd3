//! Domain types shared by the site session, the notifier and the workflow.
//!
//! Everything here is short-lived: values are built once per run and dropped
//! when the run ends.

mod alert;
mod types;

pub use alert::Alert;
pub use types::{Credentials, FormData, HttpMethod, Page};
