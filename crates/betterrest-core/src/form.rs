//! Single-screen bedtime form driven by explicit input-change handlers.
//!
//! Every setter updates one input and, with live preview on, recomputes the
//! bedtime immediately. `submit` always recomputes and presents the alert.

use serde::Serialize;

use crate::bedtime::{Bedtime, BedtimeCalculator};
use crate::error::CalculationError;
use crate::input::{CoffeeIntake, SleepAmount, WakeTime};
use crate::model::Predictor;

/// Alert title shown with a successful result.
pub const SUCCESS_TITLE: &str = "Your ideal bedtime is...";

/// Modal alert contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn from_result(result: &Result<Bedtime, CalculationError>) -> Self {
        match result {
            Ok(bedtime) => Self {
                title: SUCCESS_TITLE.to_string(),
                message: bedtime.display.clone(),
            },
            Err(err) => Self {
                title: err.title.to_string(),
                message: err.message.to_string(),
            },
        }
    }
}

/// Outcome of the most recent calculation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Ready(Bedtime),
    Failed(CalculationError),
}

/// Starting values for the form inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormInputs {
    pub wake: WakeTime,
    pub sleep: SleepAmount,
    pub coffee: CoffeeIntake,
}

pub struct BedtimeForm<P> {
    calculator: BedtimeCalculator<P>,
    inputs: FormInputs,
    live_preview: bool,
    status: FormStatus,
    alert: Option<Alert>,
    showing_alert: bool,
    calculations: u64,
}

impl<P: Predictor> BedtimeForm<P> {
    pub fn new(calculator: BedtimeCalculator<P>, inputs: FormInputs, live_preview: bool) -> Self {
        Self {
            calculator,
            inputs,
            live_preview,
            status: FormStatus::Idle,
            alert: None,
            showing_alert: false,
            calculations: 0,
        }
    }

    pub fn inputs(&self) -> FormInputs {
        self.inputs
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn live_preview(&self) -> bool {
        self.live_preview
    }

    /// Number of calculations run so far.
    pub fn calculations(&self) -> u64 {
        self.calculations
    }

    /// Text of the "ideal bedtime" section: the bedtime or the error message.
    pub fn ideal_bedtime(&self) -> &str {
        self.alert.as_ref().map_or("", |a| a.message.as_str())
    }

    /// The alert, only while it is presented.
    pub fn presented_alert(&self) -> Option<&Alert> {
        if self.showing_alert {
            self.alert.as_ref()
        } else {
            None
        }
    }

    pub fn set_wake_time(&mut self, wake: WakeTime) {
        self.inputs.wake = wake;
        self.changed();
    }

    pub fn set_sleep_amount(&mut self, sleep: SleepAmount) {
        self.inputs.sleep = sleep;
        self.changed();
    }

    pub fn increment_sleep(&mut self) {
        self.set_sleep_amount(self.inputs.sleep.increment());
    }

    pub fn decrement_sleep(&mut self) {
        self.set_sleep_amount(self.inputs.sleep.decrement());
    }

    pub fn set_coffee(&mut self, coffee: CoffeeIntake) {
        self.inputs.coffee = coffee;
        self.changed();
    }

    /// Recompute once without presenting the alert.
    pub fn refresh(&mut self) -> &FormStatus {
        let result = self.calculator.calculate(
            self.inputs.wake,
            self.inputs.sleep,
            self.inputs.coffee,
        );
        self.calculations += 1;
        self.alert = Some(Alert::from_result(&result));
        self.status = match result {
            Ok(bedtime) => FormStatus::Ready(bedtime),
            Err(err) => FormStatus::Failed(err),
        };
        &self.status
    }

    /// Recompute and present the alert.
    pub fn submit(&mut self) -> Option<&Alert> {
        self.refresh();
        self.showing_alert = true;
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.showing_alert = false;
    }

    fn changed(&mut self) {
        if self.live_preview {
            self.refresh();
        }
    }
}
