//! Command-line argument definitions

use clap::Parser;

/// Derive diagrams and a requirements sheet from an AUTOSAR ARXML file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input ARXML file
    #[arg(help = "Path to the input .arxml or .xml file")]
    pub input: String,

    /// Directory receiving the exported files
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Export the component interaction sequence diagram
    #[arg(long)]
    pub sequence: bool,

    /// Export behavior state diagrams
    #[arg(long)]
    pub state: bool,

    /// Export the requirements spreadsheet
    #[arg(long)]
    pub requirements: bool,

    /// Restrict diagrams to one component type, e.g. /Swc/Controller
    #[arg(long)]
    pub component: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Whether no export flag was given, meaning everything is exported
    pub fn exports_everything(&self) -> bool {
        !(self.sequence || self.state || self.requirements)
    }
}
