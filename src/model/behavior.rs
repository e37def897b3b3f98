//! Internal behavior: runnables, RTE events and state machines

use super::core::OpaqueElement;
use super::path::ShortNamePath;

/// Category of an RTE event, taken from its element tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `TIMING-EVENT`
    Timing,
    /// `INIT-EVENT`
    Init,
    /// `DATA-RECEIVED-EVENT`
    DataReceived,
    /// `OPERATION-INVOKED-EVENT`
    OperationInvoked,
    /// `SWC-MODE-SWITCH-EVENT`
    ModeSwitch,
    /// `BACKGROUND-EVENT`
    Background,
    /// Any other `*-EVENT`
    Other(String),
}

impl EventKind {
    /// Classify an event tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TIMING-EVENT" => EventKind::Timing,
            "INIT-EVENT" => EventKind::Init,
            "DATA-RECEIVED-EVENT" => EventKind::DataReceived,
            "OPERATION-INVOKED-EVENT" => EventKind::OperationInvoked,
            "SWC-MODE-SWITCH-EVENT" => EventKind::ModeSwitch,
            "BACKGROUND-EVENT" => EventKind::Background,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// An RTE event declared by an internal behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RteEvent {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Event category
    pub kind: EventKind,
    /// Runnable started by this event
    pub start_on: Option<ShortNamePath>,
}

/// How a runnable uses a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// `DATA-SEND-POINTS`
    DataSend,
    /// `DATA-RECEIVE-POINT-BY-ARGUMENTS` / `DATA-RECEIVE-POINT-BY-VALUES`
    DataReceive,
    /// `DATA-READ-ACCESSS`
    DataRead,
    /// `DATA-WRITE-ACCESSS`
    DataWrite,
    /// `SERVER-CALL-POINTS`
    ServerCall,
    /// `MODE-SWITCH-POINTS`
    ModeSwitch,
    /// `MODE-ACCESS-POINTS`
    ModeAccess,
}

impl AccessKind {
    /// Classify the container element that groups access points
    pub fn from_container(tag: &str) -> Option<Self> {
        match tag {
            "DATA-SEND-POINTS" => Some(AccessKind::DataSend),
            "DATA-RECEIVE-POINT-BY-ARGUMENTS" | "DATA-RECEIVE-POINT-BY-VALUES" => {
                Some(AccessKind::DataReceive)
            }
            "DATA-READ-ACCESSS" => Some(AccessKind::DataRead),
            "DATA-WRITE-ACCESSS" => Some(AccessKind::DataWrite),
            "SERVER-CALL-POINTS" => Some(AccessKind::ServerCall),
            "MODE-SWITCH-POINTS" => Some(AccessKind::ModeSwitch),
            "MODE-ACCESS-POINTS" => Some(AccessKind::ModeAccess),
            _ => None,
        }
    }

    /// Short label used in diagrams
    pub fn label(&self) -> &'static str {
        match self {
            AccessKind::DataSend => "send",
            AccessKind::DataReceive => "receive",
            AccessKind::DataRead => "read",
            AccessKind::DataWrite => "write",
            AccessKind::ServerCall => "call",
            AccessKind::ModeSwitch => "switch",
            AccessKind::ModeAccess => "mode",
        }
    }
}

/// A runnable's access to one of its component's ports
#[derive(Debug, Clone, PartialEq)]
pub struct PortAccess {
    /// Short name of the access point
    pub name: String,
    /// Full path of the access point
    pub path: ShortNamePath,
    /// Access category
    pub kind: AccessKind,
    /// Accessed port
    pub port: ShortNamePath,
    /// Accessed data element, operation or mode group
    pub target: Option<ShortNamePath>,
}

impl PortAccess {
    /// Name shown for this access in a sequence diagram
    pub fn operation_name(&self) -> &str {
        self.target
            .as_ref()
            .and_then(ShortNamePath::name)
            .unwrap_or(&self.name)
    }
}

/// A schedulable unit of behavior
#[derive(Debug, Clone, PartialEq)]
pub struct Runnable {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Events whose start-on reference names this runnable, in document order
    pub triggers: Vec<ShortNamePath>,
    /// Port access points in declaration order
    pub access_points: Vec<PortAccess>,
    /// Unrecognized children and access points without a port, kept verbatim
    pub opaque: Vec<OpaqueElement>,
}

/// A state of a state machine
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Whether this is the machine's initial state
    pub initial: bool,
    /// Unrecognized children kept verbatim
    pub opaque: Vec<OpaqueElement>,
}

/// A transition between two states of the same machine
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Short name, when the transition is identifiable
    pub name: Option<String>,
    /// Source state
    pub source: ShortNamePath,
    /// Target state
    pub target: ShortNamePath,
    /// Triggering RTE event
    pub event: Option<ShortNamePath>,
    /// Guard expression, not interpreted
    pub guard: Option<String>,
}

/// Behavioral state machine of a component
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachine {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// States in declaration order
    pub states: Vec<State>,
    /// Transitions in declaration order
    pub transitions: Vec<Transition>,
    /// Unrecognized children of the machine, its containers and transitions
    pub opaque: Vec<OpaqueElement>,
}

impl StateMachine {
    /// State with the given path
    pub fn state(&self, path: &ShortNamePath) -> Option<&State> {
        self.states.iter().find(|s| &s.path == path)
    }

    /// All states flagged initial
    pub fn initial_states(&self) -> impl Iterator<Item = &State> {
        self.states.iter().filter(|s| s.initial)
    }
}

/// Implementation-level description of a component
#[derive(Debug, Clone, PartialEq)]
pub struct InternalBehavior {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Owning component type
    pub component: ShortNamePath,
    /// RTE events in declaration order
    pub events: Vec<RteEvent>,
    /// Runnables in declaration order
    pub runnables: Vec<Runnable>,
    /// Behavioral state machine
    pub state_machine: Option<StateMachine>,
    /// Unrecognized children kept verbatim
    pub opaque: Vec<OpaqueElement>,
}

impl InternalBehavior {
    /// Event with the given path
    pub fn event(&self, path: &ShortNamePath) -> Option<&RteEvent> {
        self.events.iter().find(|e| &e.path == path)
    }
}
