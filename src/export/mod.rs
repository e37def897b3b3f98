//! Export pipeline and artifact serializers
//!
//! [`run`] parses one ARXML document and derives every requested artifact.
//! Parsing failures abort the run; generator failures are stored per option
//! so that, for example, a missing state machine does not hide a successful
//! sequence diagram or requirements table.

pub mod plantuml;
pub mod sheet;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::diagram::{SequenceDiagram, StateDiagram, sequence, state};
use crate::error::{Error, Result};
use crate::model::{Model, ParserConfig, RequirementAnnotation, ShortNamePath};
use crate::requirements;

/// File extensions accepted as ARXML input
pub const SUPPORTED_EXTENSIONS: &[&str] = &["arxml", "xml"];

/// Whether a file name has a supported extension (case-insensitive)
pub fn is_supported_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Reject file names without a supported extension
pub fn check_file_name(name: &str) -> Result<()> {
    if is_supported_file_name(name) {
        Ok(())
    } else {
        Err(Error::UnsupportedInput(name.to_string()))
    }
}

/// Which artifacts to derive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Derive the sequence diagram
    pub sequence: bool,
    /// Derive state diagrams
    pub state: bool,
    /// Derive the requirements table
    pub requirements: bool,
    /// Restrict diagrams to one component type
    pub component: Option<ShortNamePath>,
}

impl ExportOptions {
    /// Every artifact, for the whole model
    pub fn all() -> Self {
        Self {
            sequence: true,
            state: true,
            requirements: true,
            component: None,
        }
    }

    /// Restrict diagrams to one component type
    pub fn with_component(mut self, component: impl Into<ShortNamePath>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Whether no artifact is selected
    pub fn is_empty(&self) -> bool {
        !(self.sequence || self.state || self.requirements)
    }
}

/// Outcome of one export run
///
/// Each field is `None` when the option was not requested.
#[derive(Debug)]
pub struct ExportReport {
    /// The model every artifact was derived from
    pub model: Model,
    /// Sequence diagram result
    pub sequence: Option<Result<SequenceDiagram>>,
    /// State diagram results, one diagram per component with a state machine
    pub state: Option<Result<Vec<StateDiagram>>>,
    /// Requirements table
    pub requirements: Option<Vec<RequirementAnnotation>>,
}

impl ExportReport {
    /// Errors of the failed options, labelled by option
    pub fn failures(&self) -> Vec<(&'static str, &Error)> {
        let mut failures = Vec::new();
        if let Some(Err(e)) = &self.sequence {
            failures.push(("sequence", e));
        }
        if let Some(Err(e)) = &self.state {
            failures.push(("state", e));
        }
        failures
    }
}

/// Parse a document and derive the selected artifacts
pub fn run(bytes: &[u8], config: &ParserConfig, options: &ExportOptions) -> Result<ExportReport> {
    let model = Model::from_bytes_with_config(bytes, config)?;
    let component = options.component.as_ref();

    let sequence = options
        .sequence
        .then(|| sequence::generate(&model, component));
    let state = options.state.then(|| match component {
        Some(path) => state::generate(&model, path).map(|diagram| vec![diagram]),
        None => state::generate_all(&model),
    });
    let requirements = options.requirements.then(|| requirements::extract(&model));

    let report = ExportReport {
        model,
        sequence,
        state,
        requirements,
    };
    for (option, error) in report.failures() {
        warn!(option, error:% = error; "Export option failed");
    }
    Ok(report)
}

/// Write the successful artifacts of a report into `dir`
///
/// Files are named after `stem`: `<stem>_requirements.xlsx`,
/// `<stem>_sequence.puml` and `<stem>_state_<component>.puml`. Components
/// sharing a short name are labelled with their full path, segments joined
/// by `_`. Returns the written paths in that order.
pub fn write_report(report: &ExportReport, dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if let Some(requirements) = &report.requirements {
        let path = dir.join(format!("{}_requirements.xlsx", stem));
        let mut file =
            sheet::write_requirements_workbook(requirements, BufWriter::new(File::create(&path)?))?;
        file.flush()?;
        written.push(path);
    }

    if let Some(Ok(diagram)) = &report.sequence {
        let path = dir.join(format!("{}_sequence.puml", stem));
        std::fs::write(&path, plantuml::sequence_to_plantuml(diagram))?;
        written.push(path);
    }

    if let Some(Ok(diagrams)) = &report.state {
        for diagram in diagrams {
            let name = state_file_label(diagram, diagrams);
            let path = dir.join(format!("{}_state_{}.puml", stem, name));
            std::fs::write(&path, plantuml::state_to_plantuml(diagram))?;
            written.push(path);
        }
    }

    info!(dir:? = dir, files = written.len(); "Wrote export artifacts");
    Ok(written)
}

/// File label of a state diagram, unique among `all`
fn state_file_label(diagram: &StateDiagram, all: &[StateDiagram]) -> String {
    let name = diagram.component.name().unwrap_or("root");
    let shared = all
        .iter()
        .filter(|other| other.component.name() == diagram.component.name())
        .count()
        > 1;
    if shared {
        diagram.component.segments().join("_")
    } else {
        name.to_string()
    }
}
