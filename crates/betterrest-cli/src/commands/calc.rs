//! One-shot bedtime calculation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use betterrest_core::form::SUCCESS_TITLE;
use betterrest_core::{
    BedtimeCalculator, ClockFormat, CoffeeIntake, Config, SleepAmount, WakeTime,
};

#[derive(Args)]
pub struct CalcArgs {
    /// Wake-up time (HH:MM, 24-hour). Defaults to the configured value
    #[arg(long)]
    wake: Option<WakeTime>,
    /// Desired hours of sleep (4-12, quarter-hour steps)
    #[arg(long)]
    sleep: Option<SleepAmount>,
    /// Daily cups of coffee (1-20)
    #[arg(long)]
    coffee: Option<CoffeeIntake>,
    /// Path to a JSON model artifact
    #[arg(long)]
    model: Option<PathBuf>,
    /// Clock format for the result: 12h or 24h
    #[arg(long)]
    clock: Option<ClockFormat>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    title: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    predicted_sleep_hours: Option<f64>,
}

pub fn run(args: CalcArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let defaults = config.form_inputs();

    let wake = args.wake.unwrap_or(defaults.wake);
    let sleep = args.sleep.unwrap_or(defaults.sleep);
    let coffee = args.coffee.unwrap_or(defaults.coffee);
    let clock = args.clock.unwrap_or(config.display.clock);

    let predictor = super::model_source(&config, args.model).predictor();
    let calculator = BedtimeCalculator::with_clock(predictor, clock);
    let result = calculator.calculate(wake, sleep, coffee);

    let output = match &result {
        Ok(bedtime) => CalcOutput {
            title: SUCCESS_TITLE,
            message: &bedtime.display,
            predicted_sleep_hours: Some(bedtime.predicted_sleep_hours),
        },
        Err(err) => CalcOutput {
            title: err.title,
            message: err.message,
            predicted_sleep_hours: None,
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.title);
        println!("{}", output.message);
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
