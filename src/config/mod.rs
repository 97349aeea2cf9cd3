//! Configuration loading.
//!
//! The configuration is a single TOML file passed on the command line. It
//! holds the camel's credentials, the alert mail settings and an optional
//! override of the site address.

mod settings;

pub use settings::{
    Config, ConfigError, MailSettings, SiteSettings, TeveSettings, CONFIG_EXAMPLE,
    DEFAULT_BASE_URL, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
