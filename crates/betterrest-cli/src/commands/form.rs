//! Line-driven bedtime form.
//!
//! Each stdin line changes one input (`wake 06:30`, `sleep 9`, `sleep +`,
//! `coffee 3`) or acts on the form (`calculate`, `show`, `quit`).

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use betterrest_core::{
    BedtimeCalculator, BedtimeForm, ClockFormat, CoffeeIntake, Config, InputError, Predictor,
    SleepAmount, WakeTime,
};

#[derive(Args)]
pub struct FormArgs {
    /// Path to a JSON model artifact
    #[arg(long)]
    model: Option<PathBuf>,
    /// Clock format for results: 12h or 24h
    #[arg(long)]
    clock: Option<ClockFormat>,
    /// Only calculate on `calculate`, not on every change
    #[arg(long)]
    no_live_preview: bool,
}

#[derive(Debug, PartialEq)]
enum FormCommand {
    Wake(WakeTime),
    Sleep(SleepAmount),
    SleepUp,
    SleepDown,
    Coffee(CoffeeIntake),
    Calculate,
    Show,
    Quit,
}

impl FromStr for FormCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments: {line}"));
        }

        let need = |what: &str| format!("'{verb}' needs {what}");
        let input = |e: InputError| e.to_string();

        match (verb, arg) {
            ("wake", Some(v)) => v.parse().map(FormCommand::Wake).map_err(input),
            ("wake", None) => Err(need("a time (HH:MM)")),
            ("sleep", Some("+")) => Ok(FormCommand::SleepUp),
            ("sleep", Some("-")) => Ok(FormCommand::SleepDown),
            ("sleep", Some(v)) => v.parse().map(FormCommand::Sleep).map_err(input),
            ("sleep", None) => Err(need("hours, '+' or '-'")),
            ("coffee", Some(v)) => v.parse().map(FormCommand::Coffee).map_err(input),
            ("coffee", None) => Err(need("a number of cups")),
            ("calculate", None) => Ok(FormCommand::Calculate),
            ("show", None) => Ok(FormCommand::Show),
            ("quit" | "exit", None) => Ok(FormCommand::Quit),
            _ => Err(format!("unknown command: {line}")),
        }
    }
}

pub fn run(args: FormArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let clock = args.clock.unwrap_or(config.display.clock);
    let live_preview = config.form.live_preview && !args.no_live_preview;

    let predictor = super::model_source(&config, args.model).predictor();
    let calculator = BedtimeCalculator::with_clock(predictor, clock);
    let mut form = BedtimeForm::new(calculator, config.form_inputs(), live_preview);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    drive(&mut form, stdin.lock(), &mut stdout.lock())
}

fn drive<P: Predictor>(
    form: &mut BedtimeForm<P>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    form.refresh();
    show(form, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<FormCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        match command {
            FormCommand::Wake(wake) => form.set_wake_time(wake),
            FormCommand::Sleep(sleep) => form.set_sleep_amount(sleep),
            FormCommand::SleepUp => form.increment_sleep(),
            FormCommand::SleepDown => form.decrement_sleep(),
            FormCommand::Coffee(coffee) => form.set_coffee(coffee),
            FormCommand::Calculate => {
                if let Some(alert) = form.submit() {
                    writeln!(out, "{}", alert.title)?;
                    writeln!(out, "{}", alert.message)?;
                }
                form.dismiss_alert();
                continue;
            }
            FormCommand::Show => {
                show(form, out)?;
                continue;
            }
            FormCommand::Quit => break,
        }

        if form.live_preview() {
            writeln!(out, "Your ideal bedtime is... {}", form.ideal_bedtime())?;
        }
    }
    Ok(())
}

fn show<P: Predictor>(form: &BedtimeForm<P>, out: &mut impl Write) -> std::io::Result<()> {
    let inputs = form.inputs();
    writeln!(out, "When do you want to wake up? {}", inputs.wake)?;
    writeln!(out, "Desired amount of sleep: {}", inputs.sleep.label())?;
    writeln!(out, "Daily coffee intake: {}", inputs.coffee.label())?;
    writeln!(out, "Your ideal bedtime is... {}", form.ideal_bedtime())
}
