//! Core error types for betterrest-core.
//!
//! Predictor failures carry full diagnostic detail for logging. The
//! calculator collapses them into [`CalculationError`], the only error a
//! caller ever shows to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Title shown when a bedtime cannot be calculated.
pub const ERROR_TITLE: &str = "Error";

/// Message shown when a bedtime cannot be calculated.
pub const ERROR_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

/// Errors raised by a [`crate::Predictor`].
#[derive(Error, Debug)]
pub enum PredictorError {
    /// The regression artifact could not be loaded or configured
    #[error("Failed to load model from {source_name}: {message}")]
    ModelLoad {
        source_name: String,
        message: String,
    },

    /// The loaded model could not produce an estimate for the given inputs
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl PredictorError {
    pub(crate) fn load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        PredictorError::ModelLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// User-facing calculation failure.
///
/// Always carries the same title/message pair; internal detail stays in the
/// logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{title}: {message}")]
pub struct CalculationError {
    pub title: &'static str,
    pub message: &'static str,
}

impl CalculationError {
    pub fn generic() -> Self {
        Self {
            title: ERROR_TITLE,
            message: ERROR_MESSAGE,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Errors parsing user-supplied input values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid wake time '{0}', expected HH:MM")]
    WakeTime(String),

    #[error("invalid sleep amount '{0}'")]
    SleepAmount(String),

    #[error("invalid coffee intake '{0}'")]
    CoffeeIntake(String),

    #[error("invalid clock format '{0}', expected 12h or 24h")]
    ClockFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_error_uses_fixed_text() {
        let err = CalculationError::generic();
        assert_eq!(err.title, "Error");
        assert_eq!(
            err.message,
            "Sorry, there was a problem calculating your bedtime."
        );
    }

    #[test]
    fn calculation_error_display_joins_title_and_message() {
        assert_eq!(
            CalculationError::generic().to_string(),
            "Error: Sorry, there was a problem calculating your bedtime."
        );
    }

    #[test]
    fn model_load_message_names_source() {
        let err = PredictorError::load("/tmp/missing.json", "not found");
        assert_eq!(
            err.to_string(),
            "Failed to load model from /tmp/missing.json: not found"
        );
    }
}
