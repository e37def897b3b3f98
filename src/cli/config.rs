//! Configuration file loading for the CLI
//!
//! The TOML file deserializes straight into [`ParserConfig`]:
//!
//! ```toml
//! external_prefixes = ["/AUTOSAR_Platform"]
//!
//! [requirements]
//! tags = ["STRUCTURED-REQ", "SPEC-ITEM"]
//! sdg_gid = "Requirement"
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use thiserror::Error;

use arxml_export::ParserConfig;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),
}

/// Load the parser configuration, falling back to defaults without a path
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<ParserConfig, ConfigError> {
    let Some(path) = explicit_path else {
        debug!("No configuration file given, using default configuration");
        return Ok(ParserConfig::default());
    };
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading configuration");

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Parse TOML configuration content
pub fn parse_config(content: &str) -> Result<ParserConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}
