//! # BetterRest Core Library
//!
//! This library recommends a bedtime from a desired wake-up time, a desired
//! amount of sleep and daily coffee intake. A pre-trained regression model
//! predicts how long the user will actually sleep; the bedtime is the wake-up
//! time minus that prediction.
//!
//! ## Architecture
//!
//! - **Model**: the [`Predictor`] capability and the artifact-backed
//!   [`SleepModel`], loaded once and shared read-only
//! - **Calculator**: [`BedtimeCalculator`] turns inputs into a formatted
//!   bedtime and hides predictor failures behind a fixed user-facing error
//! - **Form**: [`BedtimeForm`] drives the calculator from explicit
//!   input-change handlers, with optional live preview
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`calculate_bedtime`]: one-shot calculation returning the display string
//! - [`WakeTime`], [`SleepAmount`], [`CoffeeIntake`]: clamped form inputs
//! - [`Config`]: application configuration management

pub mod bedtime;
pub mod error;
pub mod form;
pub mod input;
pub mod model;
pub mod storage;

pub use bedtime::{calculate_bedtime, subtract_hours, Bedtime, BedtimeCalculator};
pub use error::{CalculationError, ConfigError, InputError, PredictorError};
pub use form::{Alert, BedtimeForm, FormInputs, FormStatus};
pub use input::{ClockFormat, CoffeeIntake, SleepAmount, WakeTime};
pub use model::{ModelInfo, ModelSource, Predictor, SleepFeatures, SleepModel, UnavailableModel};
pub use storage::Config;
