//! Model root, package tree and the flat entity index

use indexmap::IndexMap;

use super::behavior::{EventKind, StateMachine};
use super::component::{
    ComponentKind, Connector, DataType, Interface, InterfaceKind, PortDirection,
    SoftwareComponent,
};
use super::path::ShortNamePath;
use super::requirement::RequirementAnnotation;
use crate::xml::{Element, QName};

/// Namespace of the AUTOSAR R4 schema family
pub const AUTOSAR_NAMESPACE: &str = "http://autosar.org/schema/r4.0";

/// Classification of a named element in the flat index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// `AR-PACKAGE`
    Package,
    /// `*-SW-COMPONENT-TYPE`
    Component(ComponentKind),
    /// `SW-COMPONENT-PROTOTYPE`
    ComponentPrototype,
    /// `P-PORT-PROTOTYPE` / `R-PORT-PROTOTYPE`
    Port(PortDirection),
    /// `*-INTERFACE`
    Interface(InterfaceKind),
    /// Data element, operation or mode group of an interface
    InterfaceItem,
    /// `*-DATA-TYPE`
    DataType,
    /// `SWC-INTERNAL-BEHAVIOR`
    InternalBehavior,
    /// `RUNNABLE-ENTITY`
    Runnable,
    /// `*-EVENT`
    Event(EventKind),
    /// Variable access, server call point or mode access point
    AccessPoint,
    /// `STATE-MACHINE`
    StateMachine,
    /// `STATE`
    State,
    /// `TRANSITION`
    Transition,
    /// `*-SW-CONNECTOR`
    Connector,
    /// Any other identifiable element, carrying its tag
    Other(String),
}

impl EntityKind {
    /// Classify an identifiable element by its tag local name
    pub fn classify(tag: &str) -> Self {
        match tag {
            "AR-PACKAGE" => EntityKind::Package,
            "SW-COMPONENT-PROTOTYPE" => EntityKind::ComponentPrototype,
            "P-PORT-PROTOTYPE" => EntityKind::Port(PortDirection::Provided),
            "R-PORT-PROTOTYPE" => EntityKind::Port(PortDirection::Required),
            "VARIABLE-DATA-PROTOTYPE"
            | "PARAMETER-DATA-PROTOTYPE"
            | "CLIENT-SERVER-OPERATION"
            | "MODE-DECLARATION-GROUP-PROTOTYPE"
            | "TRIGGER" => EntityKind::InterfaceItem,
            "RUNNABLE-ENTITY" => EntityKind::Runnable,
            "VARIABLE-ACCESS" | "MODE-ACCESS-POINT" | "MODE-SWITCH-POINT" => {
                EntityKind::AccessPoint
            }
            "STATE-MACHINE" => EntityKind::StateMachine,
            "STATE" => EntityKind::State,
            "TRANSITION" => EntityKind::Transition,
            t if t.ends_with("-SW-COMPONENT-TYPE") => {
                EntityKind::Component(ComponentKind::from_tag(t))
            }
            t if t.ends_with("-SERVER-CALL-POINT") => EntityKind::AccessPoint,
            t if t.ends_with("INTERNAL-BEHAVIOR") => EntityKind::InternalBehavior,
            t if t.ends_with("-SW-CONNECTOR") => EntityKind::Connector,
            t if t.ends_with("-DATA-TYPE") => EntityKind::DataType,
            t if t.ends_with("-INTERFACE") => EntityKind::Interface(InterfaceKind::from_tag(t)),
            t if t.ends_with("-EVENT") => EntityKind::Event(EventKind::from_tag(t)),
            other => EntityKind::Other(other.to_string()),
        }
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            EntityKind::Package => "a package".to_string(),
            EntityKind::Component(_) => "a component type".to_string(),
            EntityKind::ComponentPrototype => "a component prototype".to_string(),
            EntityKind::Port(PortDirection::Provided) => "a provided port".to_string(),
            EntityKind::Port(PortDirection::Required) => "a required port".to_string(),
            EntityKind::Interface(_) => "an interface".to_string(),
            EntityKind::InterfaceItem => "an interface item".to_string(),
            EntityKind::DataType => "a data type".to_string(),
            EntityKind::InternalBehavior => "an internal behavior".to_string(),
            EntityKind::Runnable => "a runnable".to_string(),
            EntityKind::Event(_) => "an event".to_string(),
            EntityKind::AccessPoint => "an access point".to_string(),
            EntityKind::StateMachine => "a state machine".to_string(),
            EntityKind::State => "a state".to_string(),
            EntityKind::Transition => "a transition".to_string(),
            EntityKind::Connector => "a connector".to_string(),
            EntityKind::Other(tag) => format!("a <{}> element", tag),
        }
    }
}

/// Flat index record for one identifiable element
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Full path
    pub path: ShortNamePath,
    /// Classification
    pub kind: EntityKind,
    /// Element tag local name
    pub tag: String,
    /// Requirement annotations attached to this element, in document order
    pub annotations: Vec<RequirementAnnotation>,
}

impl Entity {
    /// Create an index record without annotations
    pub fn new(path: ShortNamePath, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            path,
            kind: EntityKind::classify(&tag),
            tag,
            annotations: Vec::new(),
        }
    }
}

/// An element of a type the builder does not model, kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueElement {
    /// Element tag
    pub tag: QName,
    /// Path, when the element is identifiable
    pub path: Option<ShortNamePath>,
    /// The complete subtree
    pub element: Element,
}

/// An `AR-PACKAGE` and its contents
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Nested packages
    pub packages: Vec<Package>,
    /// Component types
    pub components: Vec<SoftwareComponent>,
    /// Port interfaces
    pub interfaces: Vec<Interface>,
    /// Data types
    pub data_types: Vec<DataType>,
    /// Elements of unsupported types
    pub opaque: Vec<OpaqueElement>,
}

impl Package {
    /// Create an empty package
    pub fn new(name: impl Into<String>, path: ShortNamePath) -> Self {
        Self {
            name: name.into(),
            path,
            packages: Vec::new(),
            components: Vec::new(),
            interfaces: Vec::new(),
            data_types: Vec::new(),
            opaque: Vec::new(),
        }
    }
}

/// A resolved ARXML document
///
/// Built once per file and never mutated afterwards; generators only borrow it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Namespace of the root element
    pub schema_namespace: Option<String>,
    /// Top-level packages
    pub packages: Vec<Package>,
    /// Every identifiable element, in document order
    pub index: IndexMap<ShortNamePath, Entity>,
    /// Annotations found outside any identifiable element
    pub unowned_annotations: Vec<RequirementAnnotation>,
    /// References accepted because they point into an external package
    pub external_references: Vec<ShortNamePath>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the model holds no packages and no entities
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.index.is_empty()
    }

    /// Index record for a path
    pub fn entity(&self, path: &ShortNamePath) -> Option<&Entity> {
        self.index.get(path)
    }

    /// All packages, depth-first in document order
    pub fn all_packages(&self) -> Vec<&Package> {
        fn walk<'a>(packages: &'a [Package], out: &mut Vec<&'a Package>) {
            for package in packages {
                out.push(package);
                walk(&package.packages, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.packages, &mut out);
        out
    }

    /// All component types in package-tree order
    pub fn components(&self) -> Vec<&SoftwareComponent> {
        self.all_packages()
            .into_iter()
            .flat_map(|p| p.components.iter())
            .collect()
    }

    /// Component type with the given path
    pub fn component(&self, path: &ShortNamePath) -> Option<&SoftwareComponent> {
        self.all_packages()
            .into_iter()
            .flat_map(|p| p.components.iter())
            .find(|c| &c.path == path)
    }

    /// All interfaces in package-tree order
    pub fn interfaces(&self) -> Vec<&Interface> {
        self.all_packages()
            .into_iter()
            .flat_map(|p| p.interfaces.iter())
            .collect()
    }

    /// All connectors paired with their owning composition
    pub fn connectors(&self) -> Vec<(&SoftwareComponent, &Connector)> {
        self.components()
            .into_iter()
            .flat_map(|c| c.connectors.iter().map(move |conn| (c, conn)))
            .collect()
    }

    /// State machine of a component, if it has one
    pub fn state_machine(&self, component: &ShortNamePath) -> Option<&StateMachine> {
        self.component(component)?
            .internal_behavior
            .as_ref()?
            .state_machine
            .as_ref()
    }
}
