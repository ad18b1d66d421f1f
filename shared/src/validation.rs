//! Input validation functions
//!
//! Values reach the tracker from free-text input, so ranges are checked here
//! before anything is stored.

use crate::errors::{DomainError, ValidationError};
use crate::models::Settings;
use chrono::NaiveDate;
use once_cell::sync::Lazy;

static REMINDER_TIME: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());

const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), ValidationError> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err(ValidationError::new("weight", "Weight must be a valid number"));
    }
    if weight_kg < 20.0 {
        return Err(ValidationError::new("weight", "Weight must be at least 20 kg"));
    }
    if weight_kg > 500.0 {
        return Err(ValidationError::new("weight", "Weight must be at most 500 kg"));
    }
    Ok(())
}

/// Validate a body circumference (in cm)
pub fn validate_circumference(field: &'static str, cm: f64) -> Result<(), ValidationError> {
    if cm.is_nan() || cm.is_infinite() {
        return Err(ValidationError::new(field, "Must be a valid number"));
    }
    if cm <= 0.0 {
        return Err(ValidationError::new(field, "Must be greater than 0 cm"));
    }
    if cm > 300.0 {
        return Err(ValidationError::new(field, "Must be at most 300 cm"));
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "Percentage must be a valid number"));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::new(field, "Percentage must be between 0 and 100"));
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> Result<(), ValidationError> {
    if minutes > 1440 {
        // 24 hours
        return Err(ValidationError::new("duration", "Duration cannot exceed 24 hours"));
    }
    Ok(())
}

/// Validate reminder settings
pub fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    if !REMINDER_TIME.is_match(&settings.reminder_time) {
        return Err(ValidationError::new(
            "reminderTime",
            "Reminder time must be HH:MM (24h)",
        ));
    }
    if !WEEKDAYS.contains(&settings.measurement_reminder_day.as_str()) {
        return Err(ValidationError::new(
            "measurementReminderDay",
            "Measurement reminder day must be a weekday name",
        ));
    }
    Ok(())
}
