//! reqwest-backed site session.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use super::{Result, SiteError, SiteSession};
use crate::config::DEFAULT_BASE_URL;
use crate::domain::{FormData, HttpMethod, Page};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

/// Live session against the site.
///
/// # Example
///
/// ```ignore
/// use teveclub::providers::site::{links, SiteSession, TeveClubSession};
///
/// let mut session = TeveClubSession::new();
/// session.open()?;
/// let page = session.get(links::PET_PAGE).await?;
/// session.close();
/// ```
pub struct TeveClubSession {
    /// Base URL without a trailing slash.
    base_url: String,
    /// HTTP client holding the cookie jar; `None` while closed.
    client: Option<reqwest::Client>,
}

impl TeveClubSession {
    /// Creates a closed session against the public site.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a closed session against another base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: None,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, link: &str) -> String {
        if link.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, link)
        }
    }
}

impl Default for TeveClubSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteSession for TeveClubSession {
    fn open(&mut self) -> Result<()> {
        if self.client.is_some() {
            return Ok(());
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| SiteError::Client(e.to_string()))?;

        tracing::debug!(base_url = %self.base_url, "Site session opened");
        self.client = Some(client);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.client.is_some()
    }

    async fn request(
        &self,
        link: &str,
        method: HttpMethod,
        form: Option<&FormData>,
    ) -> Result<Page> {
        let client = self.client.as_ref().ok_or(SiteError::SessionClosed)?;
        let url = self.url_for(link);

        let mut builder = match method {
            HttpMethod::Get => client.get(&url),
            HttpMethod::Post => client.post(&url),
        };
        if let Some(form) = form {
            builder = builder.form(form.fields());
        }

        tracing::debug!(%method, %url, "Site request");
        let response = builder
            .send()
            .await
            .map_err(|e| SiteError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| SiteError::Connection(e.to_string()))?;

        Ok(Page::new(status.as_u16(), text))
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "Site session closed");
        }
    }
}
