//! Requirement annotations

use super::path::ShortNamePath;

/// A requirement traced to a model element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementAnnotation {
    /// Requirement identifier, `AUTO-REQ-<n>` when the source gives none
    pub id: String,
    /// Requirement text
    pub description: String,
    /// Element the requirement is attached to
    pub owner: ShortNamePath,
    /// Position among all annotations of the document, counted from 0
    pub position: usize,
}

impl RequirementAnnotation {
    /// Create an annotation
    pub fn new(id: impl Into<String>, description: impl Into<String>, owner: ShortNamePath) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            owner,
            position: 0,
        }
    }

    /// Set the document position
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}
