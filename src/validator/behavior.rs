//! Internal behavior and state machine rules

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{InternalBehavior, Model, SoftwareComponent, StateMachine};

/// Check state counts, the initial state and transition endpoints
pub fn validate_state_machine(machine: &StateMachine) -> Result<()> {
    if machine.states.is_empty() {
        return Err(Error::structural(&machine.path, "state machine has no states"));
    }

    let initial: Vec<&str> = machine.initial_states().map(|s| s.name.as_str()).collect();
    match initial.len() {
        0 => {
            return Err(Error::structural(
                &machine.path,
                "state machine has no initial state",
            ));
        }
        1 => {}
        _ => {
            return Err(Error::structural(
                &machine.path,
                &format!("state machine has {} initial states: {}", initial.len(), initial.join(", ")),
            ));
        }
    }

    let states: HashSet<_> = machine.states.iter().map(|s| &s.path).collect();
    for transition in &machine.transitions {
        for (role, endpoint) in [("source", &transition.source), ("target", &transition.target)] {
            if !states.contains(endpoint) {
                return Err(Error::structural(
                    &machine.path,
                    &format!("transition {} {} is not a state of this machine", role, endpoint),
                ));
            }
        }
    }
    Ok(())
}

/// Check that every access point uses a port of the owning component
///
/// Ports outside the model (external references) are not checked.
pub fn validate_access_points(
    model: &Model,
    component: &SoftwareComponent,
    behavior: &InternalBehavior,
) -> Result<()> {
    for runnable in &behavior.runnables {
        for access in &runnable.access_points {
            if model.entity(&access.port).is_none() {
                continue;
            }
            if component.port(&access.port).is_none() {
                return Err(Error::structural(
                    &access.path,
                    &format!("port {} is not a port of {}", access.port, component.path),
                ));
            }
        }
    }
    Ok(())
}

/// Check that events start runnables of their own behavior
pub fn validate_events(behavior: &InternalBehavior) -> Result<()> {
    for event in &behavior.events {
        let Some(target) = &event.start_on else {
            continue;
        };
        if !behavior.runnables.iter().any(|r| &r.path == target) {
            return Err(Error::structural(
                &event.path,
                &format!("started runnable {} belongs to another behavior", target),
            ));
        }
    }
    Ok(())
}
