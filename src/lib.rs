//! teveclub - daily care for a teveclub.hu camel
//!
//! Logs in to the site, feeds and teaches the camel, logs out, and mails the
//! operator whenever a step does not go as expected.

pub mod app;
pub mod config;
pub mod domain;
pub mod providers;
pub mod services;

pub use app::{App, AppError};
