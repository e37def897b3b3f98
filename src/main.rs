//! arxml-export CLI entry point

mod cli;

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use cli::Args;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting arxml-export");
    debug!(args:?; "Parsed arguments");

    match cli::run(&args) {
        Ok(0) => info!("Completed successfully"),
        Ok(failed) => {
            warn!(failed; "Completed with failed export options");
            process::exit(2);
        }
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    }
}
