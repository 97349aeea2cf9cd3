//! Operator alerts.

/// A failure report destined for the operator's mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Mail subject line.
    pub subject: String,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Text of the page that triggered the alert, if any.
    pub page: Option<String>,
}

impl Alert {
    /// Creates an alert without an attached page.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            page: None,
        }
    }

    /// Attaches the text of the offending page.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Plain-text mail body: the message, then a blank line and the page.
    pub fn body(&self) -> String {
        match &self.page {
            Some(page) => format!("{}\n\n{}", self.message, page),
            None => self.message.clone(),
        }
    }
}
