//! Site session trait definition.

use async_trait::async_trait;

use crate::domain::{FormData, HttpMethod, Page};

/// Result type alias for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Page links relative to the site base URL.
pub mod links {
    /// The base URL itself; the login form posts here.
    pub const HOME: &str = "";
    /// Pet page with the feeding controls.
    pub const PET_PAGE: &str = "myteve.pet";
    /// Teaching page.
    pub const TEACH_PAGE: &str = "tanit.pet";
    /// Logout page.
    pub const LOGOUT_PAGE: &str = "logout.pet";
}

/// Errors that can occur while talking to the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A request was issued before `open` or after `close`.
    #[error("session is not open")]
    SessionClosed,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Network or transport error.
    #[error("connection error: {0}")]
    Connection(String),

    /// The site answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code received.
        status: u16,
        /// URL that was requested.
        url: String,
    },
}

/// A single cookie-bearing connection context to the site.
///
/// Implementations must tolerate `close` being called on a session that was
/// never opened, and must fail requests with [`SiteError::SessionClosed`]
/// while closed.
#[async_trait]
pub trait SiteSession: Send + Sync {
    /// Creates the connection context. Calling it on an open session is a no-op.
    fn open(&mut self) -> Result<()>;

    /// Whether the session is currently open.
    fn is_open(&self) -> bool;

    /// Issues a request to `link` (or the base URL when `link` is empty).
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Status`] for any non-2xx answer.
    async fn request(
        &self,
        link: &str,
        method: HttpMethod,
        form: Option<&FormData>,
    ) -> Result<Page>;

    /// Releases the connection context.
    fn close(&mut self);

    /// Fetches a page.
    async fn get(&self, link: &str) -> Result<Page> {
        self.request(link, HttpMethod::Get, None).await
    }

    /// Submits a form.
    async fn post(&self, link: &str, form: &FormData) -> Result<Page> {
        self.request(link, HttpMethod::Post, Some(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_error_display() {
        let err = SiteError::Status {
            status: 503,
            url: "https://teveclub.hu/myteve.pet".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from https://teveclub.hu/myteve.pet");

        assert_eq!(SiteError::SessionClosed.to_string(), "session is not open");
    }
}
