//! Configuration for building models from ARXML

use serde::Deserialize;

use super::path::ShortNamePath;

/// Which elements carry requirement text
///
/// ARXML dialects differ in where tools put requirement traces, so the
/// element names are configuration rather than fixed vocabulary.
///
/// # Example
///
/// ```
/// use arxml_export::RequirementMapping;
///
/// let mapping = RequirementMapping::default().with_tag("SPEC-ITEM");
/// assert!(mapping.is_annotation_tag("SPEC-ITEM"));
/// assert!(mapping.is_annotation_tag("STRUCTURED-REQ"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequirementMapping {
    /// Local names of elements that are requirement annotations
    pub tags: Vec<String>,
    /// Child elements holding the requirement id, first match wins
    pub id_children: Vec<String>,
    /// Child elements holding the description, first match wins
    pub description_children: Vec<String>,
    /// `GID` of special data groups that carry a requirement
    pub sdg_gid: Option<String>,
}

impl Default for RequirementMapping {
    fn default() -> Self {
        Self {
            tags: vec![
                "STRUCTURED-REQ".to_string(),
                "TRACEABLE-TEXT".to_string(),
                "REQUIREMENT".to_string(),
            ],
            id_children: vec!["SHORT-NAME".to_string(), "ID".to_string()],
            description_children: vec![
                "DESC".to_string(),
                "TEXT".to_string(),
                "DESCRIPTION".to_string(),
            ],
            sdg_gid: Some("Requirement".to_string()),
        }
    }
}

impl RequirementMapping {
    /// A mapping that recognizes nothing
    pub fn empty() -> Self {
        Self {
            tags: Vec::new(),
            id_children: Vec::new(),
            description_children: Vec::new(),
            sdg_gid: None,
        }
    }

    /// Recognize an additional annotation element
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Recognize special data groups with the given `GID`
    pub fn with_sdg_gid(mut self, gid: impl Into<String>) -> Self {
        self.sdg_gid = Some(gid.into());
        self
    }

    /// Whether elements with this local name are annotations
    pub fn is_annotation_tag(&self, local: &str) -> bool {
        self.tags.iter().any(|t| t == local)
    }
}

/// Configuration for the model builder
///
/// # Example
///
/// ```
/// use arxml_export::{ParserConfig, ShortNamePath};
///
/// let config = ParserConfig::new().with_external_prefix("/AUTOSAR_Platform");
/// assert!(config.is_external(&ShortNamePath::parse("/AUTOSAR_Platform/ImplementationDataTypes/uint8")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Packages defined outside the parsed document
    ///
    /// References into these packages are recorded instead of resolved.
    external_prefixes: Vec<ShortNamePath>,
    /// Requirement annotation vocabulary
    requirements: RequirementMapping,
}

impl ParserConfig {
    /// Default configuration: every reference must resolve
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat references below `prefix` as external
    pub fn with_external_prefix(mut self, prefix: impl Into<ShortNamePath>) -> Self {
        self.external_prefixes.push(prefix.into());
        self
    }

    /// Replace the requirement mapping
    pub fn with_requirement_mapping(mut self, mapping: RequirementMapping) -> Self {
        self.requirements = mapping;
        self
    }

    /// Whether a path lies inside an external package
    pub fn is_external(&self, path: &ShortNamePath) -> bool {
        self.external_prefixes
            .iter()
            .any(|prefix| !prefix.is_root() && path.starts_with(prefix))
    }

    /// Configured external package prefixes
    pub fn external_prefixes(&self) -> &[ShortNamePath] {
        &self.external_prefixes
    }

    /// Requirement annotation vocabulary
    pub fn requirement_mapping(&self) -> &RequirementMapping {
        &self.requirements
    }
}
