//! Typed configuration sections and the TOML loader.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default address of the site.
pub const DEFAULT_BASE_URL: &str = "https://teveclub.hu";
/// Default alert mail relay.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// Default implicit-TLS port of the relay.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Example configuration shown in the CLI help.
pub const CONFIG_EXAMPLE: &str = r#"Configuration Example:
[teve]
name = "Macska"
pass = "SoseTudodMeg"

[mail]
sender = "xyz@mail.com"
pass = "NemMondomEl"
recipient = "mokus@mail.com"
"#;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or misses required keys.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Site account.
    #[serde(default)]
    pub teve: TeveSettings,
    /// Alert mail settings.
    pub mail: MailSettings,
    /// Site address override.
    #[serde(default)]
    pub site: SiteSettings,
}

impl Config {
    /// Reads and parses the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The `[teve]` section. Either key may be missing; the user is asked then.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeveSettings {
    /// Camel name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account password.
    #[serde(default, rename = "pass")]
    pub password: Option<String>,
}

impl TeveSettings {
    /// Configured name, treating an empty string as missing.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// Configured password, treating an empty string as missing.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|s| !s.is_empty())
    }
}

/// The `[mail]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// Sender address, also the SMTP login.
    pub sender: String,
    /// SMTP password of the sender.
    #[serde(rename = "pass")]
    pub password: String,
    /// Where alerts go.
    pub recipient: String,
    /// Relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// Relay port (implicit TLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

/// The optional `[site]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Base URL every page link is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn example_config_parses() {
        let body = CONFIG_EXAMPLE
            .strip_prefix("Configuration Example:\n")
            .unwrap();
        let config: Config = toml::from_str(body).unwrap();

        assert_eq!(config.teve.name(), Some("Macska"));
        assert_eq!(config.teve.password(), Some("SoseTudodMeg"));
        assert_eq!(config.mail.sender, "xyz@mail.com");
        assert_eq!(config.mail.password, "NemMondomEl");
        assert_eq!(config.mail.recipient, "mokus@mail.com");
    }

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let file = write_config(
            r#"
[mail]
sender = "a@example.com"
pass = "secret"
recipient = "b@example.com"
"#,
        );

        let config = Config::load(file.path()).unwrap();

        assert!(config.teve.name().is_none());
        assert!(config.teve.password().is_none());
        assert_eq!(config.mail.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.mail.smtp_port, DEFAULT_SMTP_PORT);
        assert_eq!(config.site.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_credentials_count_as_missing() {
        let file = write_config(
            r#"
[teve]
name = ""
pass = ""

[mail]
sender = "a@example.com"
pass = "secret"
recipient = "b@example.com"
"#,
        );

        let config = Config::load(file.path()).unwrap();

        assert!(config.teve.name().is_none());
        assert!(config.teve.password().is_none());
    }

    #[test]
    fn overrides_are_honoured() {
        let file = write_config(
            r#"
[mail]
sender = "a@example.com"
pass = "secret"
recipient = "b@example.com"
smtp_host = "mail.example.com"
smtp_port = 2465

[site]
base_url = "http://127.0.0.1:8080"
"#,
        );

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.mail.smtp_host, "mail.example.com");
        assert_eq!(config.mail.smtp_port, 2465);
        assert_eq!(config.site.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn missing_mail_section_is_parse_error() {
        let file = write_config("[teve]\nname = \"Macska\"\n");

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("nope.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
