//! External service implementations.
//!
//! - [`site`] - The cookie-bearing HTTP session against the camel site
//! - [`mail`] - Alert delivery over SMTP

pub mod mail;
pub mod site;
