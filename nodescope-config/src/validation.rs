//! Custom validation functions for the telemetry configuration.

use std::borrow::Cow;

use validator::ValidationError;

/// Validation error code for a rejected scrape interval.
pub const SCRAPE_INTERVAL_CODE: &str = "invalid_scrape_interval";

/// Human readable form of the scrape-interval rule.
pub const SCRAPE_INTERVAL_RULE: &str = "must be 0, 1, 5, 10 or a positive multiple of 15";

/// Whether `seconds` is an accepted expected scrape interval.
///
/// `0` means the interval is not configured.
pub fn is_valid_scrape_interval(seconds: i32) -> bool {
    matches!(seconds, 0 | 1 | 5 | 10) || (seconds > 0 && seconds % 15 == 0)
}

/// Validate the expected scrape interval.
pub fn validate_scrape_interval(seconds: i32) -> Result<(), ValidationError> {
    if is_valid_scrape_interval(seconds) {
        return Ok(());
    }

    let mut error = ValidationError::new(SCRAPE_INTERVAL_CODE);
    error.message = Some(Cow::Borrowed(SCRAPE_INTERVAL_RULE));
    error.add_param(Cow::Borrowed("value"), &seconds);
    Err(error)
}
