//! State diagrams from behavior state machines

use std::collections::HashSet;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::model::{EntityKind, Model, ShortNamePath, StateMachine};

/// A state in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNode {
    /// Short name
    pub name: String,
    /// Full path
    pub path: ShortNamePath,
    /// Whether this is the initial state
    pub initial: bool,
    /// Not initial and never entered by a transition
    pub unreachable: bool,
}

/// A transition with its references resolved to names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEdge {
    /// Short name, when the transition has one
    pub name: Option<String>,
    /// Source state
    pub source: ShortNamePath,
    /// Target state
    pub target: ShortNamePath,
    /// Short name of the source state
    pub source_name: String,
    /// Short name of the target state
    pub target_name: String,
    /// Triggering event
    pub event: Option<ShortNamePath>,
    /// Short name of the triggering event
    pub event_name: Option<String>,
    /// Guard expression, verbatim
    pub guard: Option<String>,
}

/// The state-transition graph of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDiagram {
    /// State machine path
    pub machine: ShortNamePath,
    /// Owning component type
    pub component: ShortNamePath,
    /// States in declaration order
    pub states: Vec<StateNode>,
    /// Transitions in declaration order
    pub transitions: Vec<TransitionEdge>,
}

impl StateDiagram {
    /// The initial state
    pub fn initial_state(&self) -> Option<&StateNode> {
        self.states.iter().find(|s| s.initial)
    }

    /// States flagged unreachable
    pub fn unreachable_states(&self) -> impl Iterator<Item = &StateNode> {
        self.states.iter().filter(|s| s.unreachable)
    }
}

/// Generate the state diagram of `component`
///
/// The machine is re-checked here because models can be built by hand:
/// exactly one initial state, transitions between its own states, and event
/// references that resolve.
pub fn generate(model: &Model, component: &ShortNamePath) -> Result<StateDiagram> {
    let found = model
        .component(component)
        .ok_or_else(|| Error::UnresolvedReference(component.clone()))?;
    let machine = found
        .internal_behavior
        .as_ref()
        .and_then(|b| b.state_machine.as_ref())
        .ok_or_else(|| Error::NoStateMachineFound(component.clone()))?;
    build(model, component, machine)
}

/// Generate a state diagram for every component that has a state machine
///
/// Fails with `NoStateMachineFound` for the root path when no component has one.
pub fn generate_all(model: &Model) -> Result<Vec<StateDiagram>> {
    let diagrams = model
        .components()
        .into_iter()
        .filter_map(|c| {
            let machine = c.internal_behavior.as_ref()?.state_machine.as_ref()?;
            Some(build(model, &c.path, machine))
        })
        .collect::<Result<Vec<_>>>()?;
    if diagrams.is_empty() {
        return Err(Error::NoStateMachineFound(ShortNamePath::root()));
    }
    Ok(diagrams)
}

fn build(model: &Model, component: &ShortNamePath, machine: &StateMachine) -> Result<StateDiagram> {
    let initial: Vec<&str> = machine.initial_states().map(|s| s.name.as_str()).collect();
    if initial.len() != 1 {
        return Err(Error::InvalidStateMachine(format!(
            "{} must have exactly one initial state, found {}",
            machine.path,
            initial.len()
        )));
    }

    let mut transitions = Vec::with_capacity(machine.transitions.len());
    let mut entered = HashSet::new();
    for transition in &machine.transitions {
        let state_name = |path: &ShortNamePath| {
            machine
                .state(path)
                .map(|s| s.name.clone())
                .ok_or_else(|| {
                    Error::InvalidStateMachine(format!(
                        "{}: transition endpoint {} is not a state of this machine",
                        machine.path, path
                    ))
                })
        };
        let source_name = state_name(&transition.source)?;
        let target_name = state_name(&transition.target)?;

        let event_name = match &transition.event {
            Some(event) => Some(event_name(model, &machine.path, event)?),
            None => None,
        };

        entered.insert(&transition.target);
        transitions.push(TransitionEdge {
            name: transition.name.clone(),
            source: transition.source.clone(),
            target: transition.target.clone(),
            source_name,
            target_name,
            event: transition.event.clone(),
            event_name,
            guard: transition.guard.clone(),
        });
    }

    let states: Vec<StateNode> = machine
        .states
        .iter()
        .map(|s| StateNode {
            name: s.name.clone(),
            path: s.path.clone(),
            initial: s.initial,
            unreachable: !s.initial && !entered.contains(&s.path),
        })
        .collect();

    for state in states.iter().filter(|s| s.unreachable) {
        warn!(state:% = state.path; "State is unreachable");
    }
    info!(
        machine:% = machine.path,
        states = states.len(),
        transitions = transitions.len();
        "Generated state diagram"
    );
    Ok(StateDiagram {
        machine: machine.path.clone(),
        component: component.clone(),
        states,
        transitions,
    })
}

/// Short name of an event, which must resolve in the model
///
/// Events declared in an external package are named by their last segment.
fn event_name(model: &Model, machine: &ShortNamePath, event: &ShortNamePath) -> Result<String> {
    let known = match model.entity(event) {
        Some(entity) => matches!(entity.kind, EntityKind::Event(_)),
        None => model.external_references.contains(event),
    };
    match event.name() {
        Some(name) if known => Ok(name.to_string()),
        _ => Err(Error::InvalidStateMachine(format!(
            "{}: event {} does not resolve to an event",
            machine, event
        ))),
    }
}
