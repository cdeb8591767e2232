//! Property tests over the full input domain with the bundled model.

use betterrest_core::{
    BedtimeCalculator, CalculationError, ClockFormat, CoffeeIntake, SleepAmount, SleepModel,
    WakeTime,
};
use chrono::NaiveTime;
use proptest::prelude::*;

fn calculator(clock: ClockFormat) -> BedtimeCalculator<SleepModel> {
    BedtimeCalculator::with_clock(SleepModel::bundled().unwrap(), clock)
}

fn wake_time() -> impl Strategy<Value = WakeTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| WakeTime::new(h, m).unwrap())
}

/// Quarter-hour steps between 4 and 12 hours.
fn sleep_amount() -> impl Strategy<Value = SleepAmount> {
    (16u32..=48).prop_map(|quarters| SleepAmount::new(f64::from(quarters) * 0.25))
}

fn coffee() -> impl Strategy<Value = CoffeeIntake> {
    (1u32..=20).prop_map(CoffeeIntake::new)
}

fn seconds_before(wake: NaiveTime, bedtime: NaiveTime) -> i64 {
    wake.signed_duration_since(bedtime).num_seconds().rem_euclid(86_400)
}

proptest! {
    #[test]
    fn every_valid_input_gives_time_or_fixed_error(
        wake in wake_time(),
        sleep in sleep_amount(),
        cups in coffee(),
    ) {
        match calculator(ClockFormat::TwelveHour).calculate(wake, sleep, cups) {
            Ok(bedtime) => {
                prop_assert!(NaiveTime::parse_from_str(&bedtime.display, "%I:%M %p").is_ok());
                prop_assert!(bedtime.display.ends_with("AM") || bedtime.display.ends_with("PM"));
            }
            Err(err) => prop_assert_eq!(err, CalculationError::generic()),
        }
    }

    #[test]
    fn twenty_four_hour_display_is_hh_mm(
        wake in wake_time(),
        sleep in sleep_amount(),
        cups in coffee(),
    ) {
        let bedtime = calculator(ClockFormat::TwentyFourHour).calculate(wake, sleep, cups).unwrap();
        prop_assert_eq!(bedtime.display.len(), 5);
        prop_assert_eq!(bedtime.display, bedtime.time.format("%H:%M").to_string());
    }

    #[test]
    fn identical_inputs_give_identical_output(
        wake in wake_time(),
        sleep in sleep_amount(),
        cups in coffee(),
    ) {
        let calc = calculator(ClockFormat::TwelveHour);
        let first = calc.calculate(wake, sleep, cups);
        let second = calc.calculate(wake, sleep, cups);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn more_sleep_never_means_later_bedtime(
        wake in wake_time(),
        quarters in 16u32..48,
        cups in coffee(),
    ) {
        let calc = calculator(ClockFormat::TwelveHour);
        let less = calc
            .calculate(wake, SleepAmount::new(f64::from(quarters) * 0.25), cups)
            .unwrap();
        let more = calc
            .calculate(wake, SleepAmount::new(f64::from(quarters + 1) * 0.25), cups)
            .unwrap();
        prop_assert!(more.predicted_sleep_hours >= less.predicted_sleep_hours);
        prop_assert!(
            seconds_before(wake.as_time(), more.time) >= seconds_before(wake.as_time(), less.time)
        );
    }
}
