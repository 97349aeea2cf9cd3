//! Interactive credential fallback.
//!
//! When the `[teve]` section leaves the name or the password out, the user
//! is asked on the terminal. The password is read without echo.

use dialoguer::{Input, Password};
use thiserror::Error;

use crate::config::TeveSettings;
use crate::domain::Credentials;

/// Prompt label for the camel name.
pub const NAME_PROMPT: &str = "Teve neve";
/// Prompt label for the password.
pub const PASSWORD_PROMPT: &str = "Jelszó";
/// Printed after an empty name.
pub const EMPTY_NAME_HINT: &str = "Kérlek adj meg egy igazi nevet";

/// Errors raised while asking for credentials.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The terminal could not be read.
    #[error("failed to read from terminal: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Source of credentials that were not configured.
pub trait CredentialPrompt {
    /// Asks for the camel name. Implementations never return an empty name.
    fn name(&self) -> Result<String, PromptError>;

    /// Asks for the password.
    fn password(&self) -> Result<String, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn name(&self) -> Result<String, PromptError> {
        read_name(
            || {
                Input::<String>::new()
                    .with_prompt(NAME_PROMPT)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(PromptError::from)
            },
            || println!("{}", EMPTY_NAME_HINT),
        )
    }

    fn password(&self) -> Result<String, PromptError> {
        Ok(Password::new()
            .with_prompt(PASSWORD_PROMPT)
            .allow_empty_password(true)
            .interact()?)
    }
}

/// Repeats `read` until it yields a non-blank name, calling `on_empty` after
/// each blank answer.
pub fn read_name<R, E>(mut read: R, mut on_empty: E) -> Result<String, PromptError>
where
    R: FnMut() -> Result<String, PromptError>,
    E: FnMut(),
{
    loop {
        let name = read()?;
        if !name.trim().is_empty() {
            return Ok(name);
        }
        on_empty();
    }
}

/// Merges configured credentials with prompted ones.
pub fn resolve_credentials(
    settings: &TeveSettings,
    prompt: &dyn CredentialPrompt,
) -> Result<Credentials, PromptError> {
    let name = match settings.name() {
        Some(name) => name.to_string(),
        None => prompt.name()?,
    };
    let password = match settings.password() {
        Some(password) => password.to_string(),
        None => prompt.password()?,
    };
    Ok(Credentials::new(name, password))
}
