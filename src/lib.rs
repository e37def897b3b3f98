//! # arxml-export
//!
//! Derive engineering artifacts from AUTOSAR ARXML documents.
//!
//! An ARXML file is read into a generic element tree, resolved into a typed
//! [`Model`] (packages, software components, ports, connectors, internal
//! behaviors, runnables, events and state machines), and then handed to
//! independent generators:
//!
//! - [`diagram::sequence`]: component interaction steps
//! - [`diagram::state`]: state-transition graphs of behavior state machines
//! - [`requirements`]: the requirement id / description table
//!
//! The [`export`] module ties these together and serializes the results.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Two-pass reference resolution, so forward references just work
//! - Unknown elements are kept as opaque nodes instead of being dropped
//! - Configurable requirement annotation vocabulary
//!
//! ## Example
//!
//! ```no_run
//! use arxml_export::{Model, ShortNamePath};
//! use arxml_export::diagram::state;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Model::from_path("system.arxml")?;
//! println!("Model contains {} components", model.components().len());
//!
//! let diagram = state::generate(&model, &ShortNamePath::parse("/Swc/Controller"))?;
//! for node in diagram.unreachable_states() {
//!     println!("unreachable: {}", node.path);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diagram;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod requirements;
pub mod validator;
pub mod xml;

pub use error::{Error, ErrorKind, Result};
pub use model::{
    AccessKind, ComponentKind, ComponentPrototype, Connector, ConnectorKind, DataType, Entity,
    EntityKind, EventKind, Interface, InterfaceItem, InterfaceKind, InternalBehavior, Model,
    OpaqueElement, Package, ParserConfig, Port, PortAccess, PortDirection, PortEndpoint,
    RequirementAnnotation, RequirementMapping, RteEvent, Runnable, ShortNamePath,
    SoftwareComponent, State, StateMachine, Transition,
};

use std::io::Read;
use std::path::Path;

impl Model {
    /// Parse ARXML bytes with the default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use arxml_export::Model;
    ///
    /// let model = Model::from_bytes(br#"<AUTOSAR xmlns="http://autosar.org/schema/r4.0"/>"#).unwrap();
    /// assert!(model.is_empty());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(bytes, &ParserConfig::new())
    }

    /// Parse ARXML bytes with a custom configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use arxml_export::{Model, ParserConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let bytes = std::fs::read("ecu.arxml")?;
    ///
    /// // Platform types live in a separate file
    /// let config = ParserConfig::new().with_external_prefix("/AUTOSAR_Platform");
    ///
    /// let model = Model::from_bytes_with_config(&bytes, &config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes_with_config(bytes: &[u8], config: &ParserConfig) -> Result<Self> {
        parser::parse_arxml(bytes, config)
    }

    /// Read a whole document from a reader and parse it
    pub fn from_reader<R: Read>(mut reader: R, config: &ParserConfig) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes_with_config(&bytes, config)
    }

    /// Read and parse an `.arxml` / `.xml` file with the default configuration
    ///
    /// Other file names are rejected with [`Error::UnsupportedInput`] before
    /// the file is opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        export::check_file_name(&path.to_string_lossy())?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
