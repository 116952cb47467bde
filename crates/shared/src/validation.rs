//! Common validation utilities.

use chrono::NaiveTime;
use validator::ValidationError;

/// Accepted time-of-day layouts, tried in order.
const TIME_OF_DAY_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Validates that a string contains at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Parses a time of day written as `HH:MM` or `HH:MM:SS`.
///
/// Blank input is treated as "no time given".
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Validates an optional time of day (`HH:MM` or `HH:MM:SS`); blank is allowed.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_time_of_day(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_of_day");
        err.message = Some("Time must be formatted as HH:MM".into());
        Err(err)
    }
}
