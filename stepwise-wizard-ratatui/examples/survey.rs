//! Run one of the shipped surveys in the terminal.
//!
//! ```text
//! cargo run -p stepwise-wizard-ratatui --example survey -- battery
//! cargo run -p stepwise-wizard-ratatui --example survey -- heat-pump sink.toml wizard.toml
//! ```
//!
//! Without a sink config, submissions are kept in memory and printed on exit.
//! Logs go to `stepwise.log` in the working directory; set `RUST_LOG` to tune.

use std::{env, fs::OpenOptions, sync::Arc, sync::Mutex};

use anyhow::{Context, bail};
use stepwise::{ResponseSink, SurveyController, SurveyDefinition, TestSink, WizardConfig};
use stepwise_sink_http::{HttpSink, HttpSinkConfig};
use stepwise_wizard_ratatui::{RatatuiError, RatatuiWizard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("stepwise.log")
        .context("opening stepwise.log")?;

    // Never log to the terminal the UI is drawing on.
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    Ok(())
}

fn run<S: ResponseSink>(
    survey: SurveyDefinition,
    config: WizardConfig,
    sink: S,
) -> anyhow::Result<Option<stepwise::Wizard>> {
    let controller = SurveyController::with_config(Arc::new(survey), config, sink);
    match RatatuiWizard::new().run_blocking(controller) {
        Ok(wizard) => Ok(Some(wizard)),
        Err(RatatuiError::Cancelled) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut args = env::args().skip(1);
    let survey = match args.next().as_deref() {
        Some("battery") | None => example_surveys::battery_survey(),
        Some("heat-pump") => example_surveys::heat_pump_survey(),
        Some(other) => bail!("unknown survey '{other}', expected 'battery' or 'heat-pump'"),
    };
    let sink_config = args.next().map(HttpSinkConfig::load).transpose()?;
    let config = args
        .next()
        .map(WizardConfig::load)
        .transpose()?
        .unwrap_or_default();

    tracing::info!(survey = %survey.title, http = sink_config.is_some(), "starting");

    match sink_config {
        Some(sink_config) => {
            let sink = HttpSink::new(&sink_config)?;
            if run(survey, config, sink)?.is_some() {
                println!("Submitted to {}", sink_config.endpoint);
            }
        }
        None => {
            let sink = TestSink::new();
            if run(survey, config, sink.clone())?.is_none() {
                println!("Survey cancelled.");
            }
            for record in sink.delivered() {
                println!("{}", record.timestamp());
                for (field, value) in record.fields() {
                    println!("  {field}: {value}");
                }
            }
        }
    }

    Ok(())
}
