//! Feed form parsing.
//!
//! The pet page offers two `<select>` controls, `kaja` (food) and `pia`
//! (water), whose options are the amounts that may still be given today.
//! Feeding always picks the largest amount offered.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::domain::FormData;

/// Name of the food control.
pub const FOOD_FIELD: &str = "kaja";
/// Name of the water control.
pub const WATER_FIELD: &str = "pia";
/// Submit flag of the feed form.
pub const FEED_SUBMIT_FIELD: &str = "etet";
/// Submit flag value.
pub const FEED_SUBMIT_VALUE: &str = "Mehet!";

/// Errors raised while reading the feed controls.
#[derive(Debug, Error)]
pub enum FeedParseError {
    /// The control name produced an unusable CSS selector.
    #[error("invalid selector for {name}: {reason}")]
    Selector {
        /// Control name.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// An option's text is not an amount.
    #[error("option {value:?} of {name} is not a number")]
    NotANumber {
        /// Control name.
        name: String,
        /// Option text as found.
        value: String,
    },
}

/// Food and water amounts to submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedAmounts {
    /// Largest food amount offered.
    pub food: u32,
    /// Largest water amount offered.
    pub water: u32,
}

impl FeedAmounts {
    /// Reads the largest offered amounts from the pet page.
    pub fn parse(html: &str) -> Result<Self, FeedParseError> {
        let document = Html::parse_document(html);
        Ok(Self {
            food: max_option(&document, FOOD_FIELD)?,
            water: max_option(&document, WATER_FIELD)?,
        })
    }

    /// True when the camel is neither hungry nor thirsty.
    pub fn is_empty(&self) -> bool {
        self.food == 0 && self.water == 0
    }

    /// The feed form for these amounts.
    pub fn to_form(&self) -> FormData {
        FormData::new()
            .field(FOOD_FIELD, self.food.to_string())
            .field(WATER_FIELD, self.water.to_string())
            .field(FEED_SUBMIT_FIELD, FEED_SUBMIT_VALUE)
    }
}

/// Largest integer option of the first element named `name`.
///
/// Returns 0 when no such element exists or it offers no options.
pub fn max_option(document: &Html, name: &str) -> Result<u32, FeedParseError> {
    let control_selector = selector(&format!("[name=\"{}\"]", name), name)?;
    let option_selector = selector("option", name)?;

    let Some(control) = document.select(&control_selector).next() else {
        return Ok(0);
    };

    let mut max = 0;
    for option in control.select(&option_selector) {
        max = max.max(option_value(option, name)?);
    }
    Ok(max)
}

fn option_value(option: ElementRef<'_>, name: &str) -> Result<u32, FeedParseError> {
    let text: String = option.text().collect();
    let text = text.trim();
    text.parse().map_err(|_| FeedParseError::NotANumber {
        name: name.to_string(),
        value: text.to_string(),
    })
}

fn selector(css: &str, name: &str) -> Result<Selector, FeedParseError> {
    Selector::parse(css).map_err(|e| FeedParseError::Selector {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
