//! Form inputs and their control semantics.
//!
//! Each type is constructed already clamped to the range its input control
//! allows, so the calculator never range-checks.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// Desired wake-up time of day, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Drops any seconds component.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour() * 3600 + self.minute() * 60
    }

    pub fn as_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl FromStr for WakeTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| InputError::WakeTime(s.to_string()))
    }
}

impl TryFrom<String> for WakeTime {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Desired hours of sleep, 4 to 12 in quarter-hour steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;
    pub const DEFAULT: f64 = 8.0;

    /// Clamps into range and snaps to the nearest step. NaN becomes the default.
    pub fn new(hours: f64) -> Self {
        if hours.is_nan() {
            return Self(Self::DEFAULT);
        }
        let snapped = (hours / Self::STEP).round() * Self::STEP;
        Self(snapped.clamp(Self::MIN, Self::MAX))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// One step up, saturating at the maximum.
    pub fn increment(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    /// One step down, saturating at the minimum.
    pub fn decrement(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    /// Stepper label, e.g. "8 hours" or "8.25 hours".
    pub fn label(&self) -> String {
        format!("{self} hours")
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<f64> for SleepAmount {
    fn from(hours: f64) -> Self {
        Self::new(hours)
    }
}

impl From<SleepAmount> for f64 {
    fn from(value: SleepAmount) -> Self {
        value.0
    }
}

impl FromStr for SleepAmount {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite())
            .map(Self::new)
            .ok_or_else(|| InputError::SleepAmount(s.to_string()))
    }
}

impl fmt::Display for SleepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Quarter steps have at most two decimals; f64 Display already
        // prints the shortest form ("8", "8.5", "8.25").
        write!(f, "{}", self.0)
    }
}

/// Daily cups of coffee, 1 to 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct CoffeeIntake(u8);

impl CoffeeIntake {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn new(cups: u32) -> Self {
        Self(cups.clamp(u32::from(Self::MIN), u32::from(Self::MAX)) as u8)
    }

    pub fn cups(&self) -> u8 {
        self.0
    }

    /// Every value the picker offers.
    pub fn choices() -> impl Iterator<Item = CoffeeIntake> {
        (Self::MIN..=Self::MAX).map(CoffeeIntake)
    }

    /// Picker label: "1 cup", "2 cups".
    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

impl Default for CoffeeIntake {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u32> for CoffeeIntake {
    fn from(cups: u32) -> Self {
        Self::new(cups)
    }
}

impl From<CoffeeIntake> for u32 {
    fn from(value: CoffeeIntake) -> Self {
        u32::from(value.0)
    }
}

impl FromStr for CoffeeIntake {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self::new)
            .map_err(|_| InputError::CoffeeIntake(s.to_string()))
    }
}

/// How bedtimes are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    /// "10:32 PM"
    #[default]
    #[serde(alias = "12h")]
    TwelveHour,
    /// "22:32"
    #[serde(alias = "24h")]
    TwentyFourHour,
}

impl ClockFormat {
    /// Short time-of-day string, no date and no seconds.
    pub fn format(&self, time: NaiveTime) -> String {
        match self {
            ClockFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            ClockFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }
}

impl FromStr for ClockFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "12h" | "12" | "twelve_hour" => Ok(ClockFormat::TwelveHour),
            "24h" | "24" | "twenty_four_hour" => Ok(ClockFormat::TwentyFourHour),
            _ => Err(InputError::ClockFormat(s.to_string())),
        }
    }
}
