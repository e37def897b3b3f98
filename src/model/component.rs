//! Software components, ports, interfaces and connectors

use super::behavior::InternalBehavior;
use super::core::OpaqueElement;
use super::path::ShortNamePath;

/// Category of a software component type, taken from its element tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// `APPLICATION-SW-COMPONENT-TYPE`
    Application,
    /// `COMPOSITION-SW-COMPONENT-TYPE`
    Composition,
    /// `SENSOR-ACTUATOR-SW-COMPONENT-TYPE`
    SensorActuator,
    /// `SERVICE-SW-COMPONENT-TYPE`
    Service,
    /// `COMPLEX-DEVICE-DRIVER-SW-COMPONENT-TYPE`
    ComplexDeviceDriver,
    /// `ECU-ABSTRACTION-SW-COMPONENT-TYPE`
    EcuAbstraction,
    /// `NV-BLOCK-SW-COMPONENT-TYPE`
    NvBlock,
    /// `PARAMETER-SW-COMPONENT-TYPE`
    Parameter,
    /// Any other `*-SW-COMPONENT-TYPE`, carrying the tag
    Other(String),
}

impl ComponentKind {
    /// Classify a component tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "APPLICATION-SW-COMPONENT-TYPE" => ComponentKind::Application,
            "COMPOSITION-SW-COMPONENT-TYPE" => ComponentKind::Composition,
            "SENSOR-ACTUATOR-SW-COMPONENT-TYPE" => ComponentKind::SensorActuator,
            "SERVICE-SW-COMPONENT-TYPE" => ComponentKind::Service,
            "COMPLEX-DEVICE-DRIVER-SW-COMPONENT-TYPE" => ComponentKind::ComplexDeviceDriver,
            "ECU-ABSTRACTION-SW-COMPONENT-TYPE" => ComponentKind::EcuAbstraction,
            "NV-BLOCK-SW-COMPONENT-TYPE" => ComponentKind::NvBlock,
            "PARAMETER-SW-COMPONENT-TYPE" => ComponentKind::Parameter,
            other => ComponentKind::Other(other.to_string()),
        }
    }
}

/// Direction of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// `P-PORT-PROTOTYPE`
    Provided,
    /// `R-PORT-PROTOTYPE`
    Required,
}

/// A typed interaction point of a component
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Provided or required
    pub direction: PortDirection,
    /// Referenced port interface
    pub interface: ShortNamePath,
}

/// Category of a port interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// `SENDER-RECEIVER-INTERFACE`
    SenderReceiver,
    /// `CLIENT-SERVER-INTERFACE`
    ClientServer,
    /// `MODE-SWITCH-INTERFACE`
    ModeSwitch,
    /// `PARAMETER-INTERFACE`
    Parameter,
    /// `NV-DATA-INTERFACE`
    NvData,
    /// `TRIGGER-INTERFACE`
    Trigger,
    /// Any other `*-INTERFACE`
    Other(String),
}

impl InterfaceKind {
    /// Classify an interface tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "SENDER-RECEIVER-INTERFACE" => InterfaceKind::SenderReceiver,
            "CLIENT-SERVER-INTERFACE" => InterfaceKind::ClientServer,
            "MODE-SWITCH-INTERFACE" => InterfaceKind::ModeSwitch,
            "PARAMETER-INTERFACE" => InterfaceKind::Parameter,
            "NV-DATA-INTERFACE" => InterfaceKind::NvData,
            "TRIGGER-INTERFACE" => InterfaceKind::Trigger,
            other => InterfaceKind::Other(other.to_string()),
        }
    }
}

/// A data element, operation or other named item declared by an interface
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceItem {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Element tag, e.g. `VARIABLE-DATA-PROTOTYPE`
    pub tag: String,
}

/// A port interface
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Interface category
    pub kind: InterfaceKind,
    /// Declared items in document order
    pub items: Vec<InterfaceItem>,
}

/// A data type declaration; its structure is not interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Element tag, e.g. `IMPLEMENTATION-DATA-TYPE`
    pub tag: String,
    /// Optional `CATEGORY` value
    pub category: Option<String>,
}

/// An instance of a component type inside a composition
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPrototype {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Instantiated component type
    pub component_type: ShortNamePath,
}

/// One side of a connector: a port of a component prototype
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortEndpoint {
    /// The component prototype the port belongs to
    pub prototype: ShortNamePath,
    /// Component type of the prototype
    pub component: ShortNamePath,
    /// Port on the component type
    pub port: ShortNamePath,
}

/// What a connector links
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorKind {
    /// Required port of one prototype wired to a provided port of another
    Assembly {
        /// Side offering the provided port
        provider: PortEndpoint,
        /// Side using the required port
        requester: PortEndpoint,
    },
    /// Port of an inner prototype exported through a port of the composition
    Delegation {
        /// Port of the inner prototype
        inner: PortEndpoint,
        /// Port of the enclosing composition
        outer_port: ShortNamePath,
    },
}

/// A connector declared by a composition
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Linked endpoints
    pub kind: ConnectorKind,
}

impl Connector {
    /// Endpoints of an assembly connector, `None` for delegations
    pub fn assembly(&self) -> Option<(&PortEndpoint, &PortEndpoint)> {
        match &self.kind {
            ConnectorKind::Assembly {
                provider,
                requester,
            } => Some((provider, requester)),
            ConnectorKind::Delegation { .. } => None,
        }
    }
}

/// A software component type
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareComponent {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Component category
    pub kind: ComponentKind,
    /// Ports in declaration order
    pub ports: Vec<Port>,
    /// Internal behavior, if declared
    pub internal_behavior: Option<InternalBehavior>,
    /// Sub-component prototypes (compositions only)
    pub prototypes: Vec<ComponentPrototype>,
    /// Connectors (compositions only)
    pub connectors: Vec<Connector>,
    /// Unrecognized children kept verbatim
    pub opaque: Vec<OpaqueElement>,
}

impl SoftwareComponent {
    /// Create a component with no ports, behavior or children
    pub fn new(name: impl Into<String>, path: ShortNamePath, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            path,
            kind,
            ports: Vec::new(),
            internal_behavior: None,
            prototypes: Vec::new(),
            connectors: Vec::new(),
            opaque: Vec::new(),
        }
    }

    /// Port with the given path
    pub fn port(&self, path: &ShortNamePath) -> Option<&Port> {
        self.ports.iter().find(|p| &p.path == path)
    }

    /// Whether this component is a composition
    pub fn is_composition(&self) -> bool {
        self.kind == ComponentKind::Composition
    }
}
