//! Site session abstraction and the reqwest-backed implementation.
//!
//! The workflow talks to the site only through [`SiteSession`], which keeps
//! the controller testable without a network. [`TeveClubSession`] is the real
//! implementation: one `reqwest::Client` with a cookie store, opened for the
//! duration of a run.

mod teveclub;
mod traits;

pub use teveclub::{TeveClubSession, USER_AGENT};
pub use traits::{links, Result, SiteError, SiteSession};
