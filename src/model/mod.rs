//! Data structures representing resolved ARXML documents

mod behavior;
mod component;
mod config;
mod core;
mod path;
mod requirement;

pub use behavior::{
    AccessKind, EventKind, InternalBehavior, PortAccess, RteEvent, Runnable, State, StateMachine,
    Transition,
};
pub use component::{
    ComponentKind, ComponentPrototype, Connector, ConnectorKind, DataType, Interface,
    InterfaceItem, InterfaceKind, Port, PortDirection, PortEndpoint, SoftwareComponent,
};
pub use config::{ParserConfig, RequirementMapping};
pub use self::core::{AUTOSAR_NAMESPACE, Entity, EntityKind, Model, OpaqueElement, Package};
pub use path::ShortNamePath;
pub use requirement::RequirementAnnotation;
