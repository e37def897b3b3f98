//! CLI logic: file checks, configuration, export and output files

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{error, info};
use thiserror::Error;

use arxml_export::export::{self, ExportOptions};
use arxml_export::{Error, ShortNamePath};

/// Errors that stop the CLI before any artifact is written
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Export(#[from] Error),
}

/// Run one export
///
/// Returns the number of requested options that failed; their errors have
/// already been logged and the successful artifacts written.
pub fn run(args: &Args) -> Result<usize, CliError> {
    info!(input = args.input, output_dir = args.output_dir; "Processing ARXML file");

    export::check_file_name(&args.input)?;
    let parser_config = config::load_config(args.config.as_ref())?;
    let options = export_options(args);

    let bytes = fs::read(&args.input).map_err(Error::from)?;
    let report = export::run(&bytes, &parser_config, &options)?;

    let failures = report.failures();
    for &(option, err) in &failures {
        error!(option; "{err}");
    }

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir).map_err(Error::from)?;
    let stem = Path::new(&args.input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    for path in export::write_report(&report, output_dir, &stem)? {
        info!(file = path.display().to_string(); "Exported");
    }

    Ok(failures.len())
}

fn export_options(args: &Args) -> ExportOptions {
    let everything = args.exports_everything();
    ExportOptions {
        sequence: everything || args.sequence,
        state: everything || args.state,
        requirements: everything || args.requirements,
        component: args.component.as_deref().map(ShortNamePath::parse),
    }
}
