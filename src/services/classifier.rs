//! Response classifiers.
//!
//! The site has no machine-readable status, so success is read off fixed
//! Hungarian phrases in the returned page text.

use std::sync::LazyLock;

use regex::Regex;

/// Shown on the landing page when the credentials were rejected.
pub const LOGIN_FAILURE_PHRASE: &str = "Valami baj van!";

/// Shown on the teaching page once the camel has had its lesson for today.
pub const TEACH_SUCCESS_PHRASE: &str = "A tevédet ma már tanítottad";

/// Offer to feed more; still present when feeding did not go through.
static FEEDING_STILL_POSSIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Adok neki .* napra elég ennivalót").expect("feeding pattern is valid")
});

/// Whether the login was accepted.
pub fn login_succeeded(text: &str) -> bool {
    !text.contains(LOGIN_FAILURE_PHRASE)
}

/// Whether teaching went through.
///
/// The phrase reads "you already taught your camel today", so this cannot
/// tell a fresh lesson from one given earlier in the day.
pub fn teach_succeeded(text: &str) -> bool {
    text.contains(TEACH_SUCCESS_PHRASE)
}

/// Whether feeding went through.
pub fn feed_succeeded(text: &str) -> bool {
    !FEEDING_STILL_POSSIBLE.is_match(text)
}
