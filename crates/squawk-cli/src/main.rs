//! `squawk` binary.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};
use miette::GraphicalReportHandler;

use squawk::SquawkError;
use squawk_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(input = args.input; "Starting Squawk");
    debug!(args:?; "Parsed arguments");

    match squawk_cli::run(&args) {
        Ok(()) => info!("Completed successfully"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Installs `env_logger`, falling back to `warn` for an unknown level name.
fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

/// Prints every problem in `err` to stderr, one graphical report each.
///
/// Reports bypass the logger so they still appear with `--log-level off`.
fn report(err: &SquawkError) {
    let handler = GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        handler
            .render_report(&mut rendered, &reportable)
            .expect("Writing to String buffer is infallible");
        eprintln!("{rendered}");
    }
}
