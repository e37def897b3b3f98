//! Error types for ARXML processing
//!
//! Every failure of the pipeline is reported through [`Error`]. Messages carry
//! an error code so that a front end can categorize them without matching on
//! the text, and name the offending element path wherever one is known.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and input selection errors
//! - **E2xxx**: XML syntax errors
//! - **E3xxx**: Model construction errors
//! - **E4xxx**: Diagram generation errors
//! - **E5xxx**: Export errors
//!
//! ## Codes
//!
//! - `E1001`: I/O error reading file
//! - `E1002`: Unsupported input file
//! - `E2001`: Malformed XML
//! - `E3001`: Unresolved short-name-path reference
//! - `E3002`: Structural violation
//! - `E4001`: Invalid state machine
//! - `E4002`: No state machine found
//! - `E4003`: No interactions found
//! - `E5001`: Export serialization error

use std::io;
use thiserror::Error;

use crate::model::ShortNamePath;

/// Result type for ARXML operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
///
/// Front ends map each kind to a single user-facing message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Reading the input failed
    Io,
    /// The input file was rejected before parsing
    UnsupportedInput,
    /// The input is not well-formed XML
    MalformedXml,
    /// A reference could not be resolved
    UnresolvedReference,
    /// A recognized element is missing required content
    StructuralViolation,
    /// A state machine breaks its invariants
    InvalidStateMachine,
    /// The requested component has no state machine
    NoStateMachineFound,
    /// No connector-backed interaction was found
    NoInteractionsFound,
    /// Writing an export artifact failed
    Export,
}

/// Errors that can occur while reading ARXML and deriving artifacts
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the file
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file was rejected by the file-name filter
    ///
    /// **Error Code**: E1002
    ///
    /// **Suggestions**:
    /// - Only `.arxml` and `.xml` files are accepted
    #[error("[E1002] Unsupported input file '{0}': expected an .arxml or .xml file")]
    UnsupportedInput(String),

    /// The document is not well-formed XML
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Mismatched or unclosed tags
    /// - Truncated file
    /// - Invalid character encoding
    #[error("[E2001] Malformed XML: {0}")]
    MalformedXml(String),

    /// A short-name-path reference does not name any element in the document
    ///
    /// **Error Code**: E3001
    ///
    /// **Suggestions**:
    /// - Check the spelling of the referenced path
    /// - Merge the ARXML file that defines the target, or declare its
    ///   package as external in the configuration
    #[error("[E3001] Unresolved reference: {0}")]
    UnresolvedReference(ShortNamePath),

    /// A recognized element lacks required content or has invalid structure
    ///
    /// **Error Code**: E3002
    ///
    /// **Common Causes**:
    /// - State machine without states, or with several initial states
    /// - Reference pointing at an element of the wrong kind
    /// - Two elements sharing the same short-name path
    #[error("[E3002] Structural violation: {0}")]
    StructuralViolation(String),

    /// A state machine handed to the state diagram generator is inconsistent
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Invalid state machine: {0}")]
    InvalidStateMachine(String),

    /// The component has no internal behavior state machine
    ///
    /// **Error Code**: E4002
    #[error("[E4002] No state machine found for {0}")]
    NoStateMachineFound(ShortNamePath),

    /// No runnable access point is backed by an assembly connector
    ///
    /// **Error Code**: E4003
    #[error("[E4003] No interactions found for {0}")]
    NoInteractionsFound(ShortNamePath),

    /// Serializing an artifact failed
    ///
    /// **Error Code**: E5001
    #[error("[E5001] Export error: {0}")]
    Export(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedXml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedXml(format!("Attribute parsing failed: {}", err))
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::MalformedXml(format!("Invalid escape sequence: {}", err))
    }
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::UnsupportedInput(_) => ErrorKind::UnsupportedInput,
            Error::MalformedXml(_) => ErrorKind::MalformedXml,
            Error::UnresolvedReference(_) => ErrorKind::UnresolvedReference,
            Error::StructuralViolation(_) => ErrorKind::StructuralViolation,
            Error::InvalidStateMachine(_) => ErrorKind::InvalidStateMachine,
            Error::NoStateMachineFound(_) => ErrorKind::NoStateMachineFound,
            Error::NoInteractionsFound(_) => ErrorKind::NoInteractionsFound,
            Error::Export(_) => ErrorKind::Export,
        }
    }

    /// Create a MalformedXml error carrying the byte offset where parsing stopped
    pub fn malformed_at(position: u64, message: impl std::fmt::Display) -> Self {
        Error::MalformedXml(format!("{} (at byte {})", message, position))
    }

    /// Create an Export error from a serializer failure
    pub fn export(message: impl std::fmt::Display) -> Self {
        Error::Export(message.to_string())
    }

    /// Create a StructuralViolation error for an element identified by its path
    ///
    /// # Example
    /// ```ignore
    /// Error::structural(&path, "state machine has no states")
    /// ```
    pub fn structural(path: &ShortNamePath, message: &str) -> Self {
        Error::StructuralViolation(format!("{}: {}", path, message))
    }

    /// Create a StructuralViolation error for a missing required child element
    pub fn missing_child(element: &str, child: &str, path: Option<&ShortNamePath>) -> Self {
        match path {
            Some(path) => Error::StructuralViolation(format!(
                "Element '<{}>' at {} is missing required child '<{}>'",
                element, path, child
            )),
            None => Error::StructuralViolation(format!(
                "Element '<{}>' is missing required child '<{}>'",
                element, child
            )),
        }
    }

    /// Create a StructuralViolation error for a reference whose target has the wrong kind
    pub fn wrong_target(reference: &str, target: &ShortNamePath, expected: &str, found: &str) -> Self {
        Error::StructuralViolation(format!(
            "Reference '<{}>' to {} must point at {}, found {}",
            reference, target, expected, found
        ))
    }
}
