//! Date-triggered response variants.

use chrono::{Datelike, NaiveDate};

/// Which flavour of a seasonal response to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalVariant {
    /// Any ordinary day.
    Regular,
    /// October 31.
    Halloween,
}

/// Returns the variant for `date`.
#[must_use]
pub fn seasonal_variant(date: NaiveDate) -> SeasonalVariant {
    match (date.month(), date.day()) {
        (10, 31) => SeasonalVariant::Halloween,
        _ => SeasonalVariant::Regular,
    }
}
