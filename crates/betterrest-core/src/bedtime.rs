//! Bedtime calculation: wake time minus predicted sleep.

use chrono::{Duration, NaiveTime};

use crate::error::CalculationError;
use crate::input::{ClockFormat, CoffeeIntake, SleepAmount, WakeTime};
use crate::model::{Predictor, SleepFeatures};

/// A successfully calculated bedtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Bedtime {
    /// Time of day to go to bed
    pub time: NaiveTime,
    /// Predicted actual sleep the bedtime was derived from
    pub predicted_sleep_hours: f64,
    /// Short time-of-day string for display
    pub display: String,
}

/// Runs the end-to-end calculation against a shared predictor.
///
/// Stateless apart from the predictor and the display format; every call is
/// independent.
pub struct BedtimeCalculator<P> {
    predictor: P,
    clock: ClockFormat,
}

impl<P: Predictor> BedtimeCalculator<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            clock: ClockFormat::default(),
        }
    }

    pub fn with_clock(predictor: P, clock: ClockFormat) -> Self {
        Self { predictor, clock }
    }

    /// Calculate the bedtime for one set of inputs.
    ///
    /// Predictor failures are logged and replaced by
    /// [`CalculationError::generic`].
    pub fn calculate(
        &self,
        wake: WakeTime,
        sleep: SleepAmount,
        coffee: CoffeeIntake,
    ) -> Result<Bedtime, CalculationError> {
        let features = SleepFeatures {
            wake: f64::from(wake.seconds_since_midnight()),
            estimated_sleep: sleep.hours(),
            coffee: f64::from(coffee.cups()),
        };

        let predicted = match self.predictor.predict(&features) {
            Ok(hours) => hours,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    %wake,
                    sleep = sleep.hours(),
                    coffee = coffee.cups(),
                    "bedtime calculation failed"
                );
                return Err(CalculationError::generic());
            }
        };

        let Some(time) = subtract_hours(wake.as_time(), predicted) else {
            tracing::warn!(predicted, "predicted sleep cannot be applied to wake time");
            return Err(CalculationError::generic());
        };

        let shown = self.clock.format(time);
        tracing::debug!(
            %wake,
            sleep = sleep.hours(),
            coffee = coffee.cups(),
            predicted,
            bedtime = %shown,
            "calculated bedtime"
        );

        Ok(Bedtime {
            time,
            predicted_sleep_hours: predicted,
            display: shown,
        })
    }
}

/// `time - hours`, wrapping past midnight. `None` for non-finite or absurd
/// durations.
pub fn subtract_hours(time: NaiveTime, hours: f64) -> Option<NaiveTime> {
    if !hours.is_finite() {
        return None;
    }
    let millis = (hours * 3_600_000.0).round();
    if millis.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    let (bedtime, _days) = time.overflowing_sub_signed(Duration::milliseconds(millis as i64));
    Some(bedtime)
}

/// One-shot calculation returning just the display string.
pub fn calculate_bedtime<P: Predictor + ?Sized>(
    predictor: &P,
    wake: WakeTime,
    sleep: SleepAmount,
    coffee: CoffeeIntake,
    clock: ClockFormat,
) -> Result<String, CalculationError> {
    BedtimeCalculator::with_clock(predictor, clock)
        .calculate(wake, sleep, coffee)
        .map(|bedtime| bedtime.display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictorError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn predict(&self, _: &SleepFeatures) -> Result<f64, PredictorError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl Predictor for Failing {
        fn predict(&self, _: &SleepFeatures) -> Result<f64, PredictorError> {
            Err(PredictorError::Prediction("boom".into()))
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<SleepFeatures>>);

    impl Predictor for Recording {
        fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError> {
            self.0.lock().unwrap().push(*features);
            Ok(8.0)
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn subtracts_prediction_across_midnight() {
        let calc = BedtimeCalculator::new(Fixed(8.5));
        let wake = WakeTime::new(7, 0).unwrap();
        let bedtime = calc
            .calculate(wake, SleepAmount::default(), CoffeeIntake::default())
            .unwrap();
        assert_eq!(bedtime.time, time(22, 30));
        assert_eq!(bedtime.display, "10:30 PM");
        assert_eq!(bedtime.predicted_sleep_hours, 8.5);
    }

    #[test]
    fn same_day_bedtime_for_afternoon_wake() {
        let calc = BedtimeCalculator::with_clock(Fixed(7.75), ClockFormat::TwentyFourHour);
        let wake = WakeTime::new(15, 0).unwrap();
        let bedtime = calc
            .calculate(wake, SleepAmount::default(), CoffeeIntake::default())
            .unwrap();
        assert_eq!(bedtime.display, "07:15");
    }

    #[test]
    fn passes_normalised_features() {
        let predictor = Recording::default();
        let calc = BedtimeCalculator::new(&predictor);
        let wake = WakeTime::new(6, 45).unwrap();
        calc.calculate(wake, SleepAmount::new(9.25), CoffeeIntake::new(3)).unwrap();
        let seen = predictor.0.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[SleepFeatures {
                wake: 24_300.0,
                estimated_sleep: 9.25,
                coffee: 3.0,
            }]
        );
    }

    #[test]
    fn predictor_failure_becomes_generic_error() {
        let calc = BedtimeCalculator::new(Failing);
        let err = calc
            .calculate(WakeTime::default(), SleepAmount::default(), CoffeeIntake::default())
            .unwrap_err();
        assert_eq!(err, CalculationError::generic());
        assert!(!err.message.contains("boom"));
    }

    #[test]
    fn non_finite_prediction_becomes_generic_error() {
        let calc = BedtimeCalculator::new(Fixed(f64::NAN));
        let err = calc
            .calculate(WakeTime::default(), SleepAmount::default(), CoffeeIntake::default())
            .unwrap_err();
        assert_eq!(err.title, "Error");
    }

    #[test]
    fn calculator_is_reusable_after_failure() {
        let flaky = FlakyOnce(AtomicBool::new(true));
        let calc = BedtimeCalculator::new(&flaky);
        let wake = WakeTime::default();
        assert!(calc.calculate(wake, SleepAmount::default(), CoffeeIntake::default()).is_err());
        assert!(calc.calculate(wake, SleepAmount::default(), CoffeeIntake::default()).is_ok());
    }

    struct FlakyOnce(AtomicBool);

    impl Predictor for FlakyOnce {
        fn predict(&self, _: &SleepFeatures) -> Result<f64, PredictorError> {
            if self.0.swap(false, Ordering::SeqCst) {
                Err(PredictorError::load("test", "unavailable"))
            } else {
                Ok(8.0)
            }
        }
    }

    #[test]
    fn one_shot_function_returns_display_string() {
        let shown = calculate_bedtime(
            &Fixed(8.0),
            WakeTime::new(7, 0).unwrap(),
            SleepAmount::default(),
            CoffeeIntake::default(),
            ClockFormat::TwelveHour,
        )
        .unwrap();
        assert_eq!(shown, "11:00 PM");
    }

    #[test]
    fn subtract_hours_handles_fractions() {
        assert_eq!(subtract_hours(time(7, 0), 0.25), Some(time(6, 45)));
        assert_eq!(subtract_hours(time(0, 0), 24.0), Some(time(0, 0)));
        assert_eq!(subtract_hours(time(7, 0), f64::INFINITY), None);
    }
}
