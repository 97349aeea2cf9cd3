//! Core value types for talking to the site.

use std::fmt;

/// Site account credentials.
///
/// The password is redacted from the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Camel (account) name.
    pub name: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP method used for a site request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// Plain page fetch.
    #[default]
    Get,
    /// Form submission.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A fetched page: the status code and the decoded body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub text: String,
}

impl Page {
    /// Creates a new page.
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }
}

/// Ordered form fields for a url-encoded POST body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an earlier value under the same key.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("Macska", "SoseTudodMeg");
        let debug = format!("{:?}", creds);

        assert!(debug.contains("Macska"));
        assert!(!debug.contains("SoseTudodMeg"));
    }

    #[test]
    fn http_method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn form_data_keeps_insertion_order() {
        let form = FormData::new()
            .field("kaja", "3")
            .field("pia", "2")
            .field("etet", "Mehet!");

        let keys: Vec<&str> = form.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["kaja", "pia", "etet"]);
    }

    #[test]
    fn form_data_field_overwrites_existing_key() {
        let form = FormData::new().field("x", "1").field("x", "26");

        assert_eq!(form.get("x"), Some("26"));
        assert_eq!(form.fields(), &[("x".to_string(), "26".to_string())]);
    }

    #[test]
    fn form_data_empty() {
        let form = FormData::new();
        assert!(form.fields().is_empty());
        assert!(form.get("anything").is_none());
    }
}
