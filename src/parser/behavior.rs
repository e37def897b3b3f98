//! Internal behaviors: events, runnables, access points and state machines

use log::{debug, trace};

use super::{BuildContext, find_descendant, identify, opaque, parse_bool};
use crate::error::{Error, Result};
use crate::model::{
    AccessKind, EntityKind, InternalBehavior, OpaqueElement, PortAccess, RteEvent, Runnable,
    ShortNamePath, State, StateMachine, Transition,
};
use crate::xml::Element;

/// Elements naming the port used by an access point, in lookup order
const PORT_REF_TAGS: &[&str] = &[
    "PORT-PROTOTYPE-REF",
    "CONTEXT-R-PORT-REF",
    "CONTEXT-P-PORT-REF",
    "CONTEXT-PORT-REF",
];

/// Elements naming what an access point reaches through the port
const TARGET_REF_TAGS: &[&str] = &[
    "TARGET-DATA-PROTOTYPE-REF",
    "TARGET-REQUIRED-OPERATION-REF",
    "TARGET-PROVIDED-OPERATION-REF",
    "TARGET-MODE-GROUP-REF",
];

/// Children of a `TRANSITION` that are read into the model
const TRANSITION_CHILDREN: &[&str] = &[
    "SHORT-NAME",
    "SOURCE-STATE-REF",
    "TARGET-STATE-REF",
    "EVENT-REF",
    "GUARD",
];

fn any_kind(_: &EntityKind) -> bool {
    true
}

pub(super) fn build_behavior(
    element: &Element,
    component: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<InternalBehavior> {
    let (name, path) = identify(element, component)?;
    let mut behavior = InternalBehavior {
        name,
        path: path.clone(),
        component: component.clone(),
        events: Vec::new(),
        runnables: Vec::new(),
        state_machine: None,
        opaque: Vec::new(),
    };

    let mut machines = Vec::new();
    for child in &element.children {
        match child.local_name() {
            "SHORT-NAME" => {}
            "EVENTS" => {
                for item in &child.children {
                    match EntityKind::classify(item.local_name()) {
                        EntityKind::Event(kind) => {
                            let (event_name, event_path) = identify(item, &path)?;
                            let start_on = ctx.optional_ref(
                                item,
                                "START-ON-EVENT-REF",
                                package,
                                |k| *k == EntityKind::Runnable,
                                "a runnable",
                            )?;
                            behavior.events.push(RteEvent {
                                name: event_name,
                                path: event_path,
                                kind,
                                start_on,
                            });
                        }
                        _ => behavior.opaque.push(opaque(item, &path)),
                    }
                }
            }
            "RUNNABLES" => {
                for item in &child.children {
                    if item.local_name() == "RUNNABLE-ENTITY" {
                        behavior.runnables.push(build_runnable(item, &path, package, ctx)?);
                    } else {
                        behavior.opaque.push(opaque(item, &path));
                    }
                }
            }
            "STATE-MACHINE" => machines.push(child),
            "STATE-MACHINES" => machines.extend(child.children_named("STATE-MACHINE")),
            _ => behavior.opaque.push(opaque(child, &path)),
        }
    }

    if machines.len() > 1 {
        return Err(Error::structural(
            &path,
            &format!("behavior declares {} state machines, expected at most one", machines.len()),
        ));
    }
    if let Some(machine) = machines.first() {
        behavior.state_machine = Some(build_state_machine(machine, &path, package, ctx)?);
    }

    // Link runnables to the events that start them
    for event in &behavior.events {
        if let Some(target) = &event.start_on {
            if let Some(runnable) = behavior.runnables.iter_mut().find(|r| &r.path == target) {
                runnable.triggers.push(event.path.clone());
            }
        }
    }

    debug!(
        path:% = behavior.path,
        events = behavior.events.len(),
        runnables = behavior.runnables.len(),
        state_machine = behavior.state_machine.is_some();
        "Built internal behavior"
    );
    Ok(behavior)
}

fn build_runnable(
    element: &Element,
    behavior: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<Runnable> {
    let (name, path) = identify(element, behavior)?;
    let mut access_points = Vec::new();
    let mut kept = Vec::new();
    for container in &element.children {
        if container.local_name() == "SHORT-NAME" {
            continue;
        }
        let Some(kind) = AccessKind::from_container(container.local_name()) else {
            kept.push(opaque(container, &path));
            continue;
        };
        for point in &container.children {
            match build_access(point, kind, &path, package, ctx)? {
                Some(access) => access_points.push(access),
                None => kept.push(opaque(point, &path)),
            }
        }
    }
    Ok(Runnable {
        name,
        path,
        triggers: Vec::new(),
        access_points,
        opaque: kept,
    })
}

/// Build an access point; `None` when it does not go through a port and is kept opaque
fn build_access(
    element: &Element,
    kind: AccessKind,
    runnable: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<Option<PortAccess>> {
    let (name, path) = identify(element, runnable)?;
    let Some(port_ref) = find_descendant(element, PORT_REF_TAGS) else {
        trace!(path:% = path; "Access point has no port reference");
        return Ok(None);
    };
    let port = ctx.resolve_ref(
        port_ref,
        package,
        |k| matches!(k, EntityKind::Port(_)),
        "a port",
    )?;
    let target = find_descendant(element, TARGET_REF_TAGS)
        .map(|target| ctx.resolve_ref(target, package, any_kind, "an interface item"))
        .transpose()?;
    Ok(Some(PortAccess {
        name,
        path,
        kind,
        port,
        target,
    }))
}

fn build_state_machine(
    element: &Element,
    behavior: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<StateMachine> {
    let (name, path) = identify(element, behavior)?;
    let states_element = element
        .child("STATES")
        .ok_or_else(|| Error::missing_child("STATE-MACHINE", "STATES", Some(&path)))?;

    let mut kept: Vec<OpaqueElement> = element
        .children
        .iter()
        .filter(|child| {
            !matches!(
                child.local_name(),
                "SHORT-NAME" | "STATES" | "TRANSITIONS" | "INITIAL-STATE-REF"
            )
        })
        .map(|child| opaque(child, &path))
        .collect();

    let mut states = Vec::new();
    for item in &states_element.children {
        if item.local_name() != "STATE" {
            kept.push(opaque(item, &path));
            continue;
        }
        let (state_name, state_path) = identify(item, &path)?;
        let initial = match item.child("INITIAL") {
            Some(flag) => parse_bool(flag, &state_path)?,
            None => false,
        };
        let extra = item
            .children
            .iter()
            .filter(|child| !matches!(child.local_name(), "SHORT-NAME" | "INITIAL"))
            .map(|child| opaque(child, &state_path))
            .collect();
        states.push(State {
            name: state_name,
            path: state_path,
            initial,
            opaque: extra,
        });
    }

    let is_state = |k: &EntityKind| *k == EntityKind::State;
    if let Some(initial) = ctx.optional_ref(element, "INITIAL-STATE-REF", package, is_state, "a state")? {
        let state = states.iter_mut().find(|s| s.path == initial).ok_or_else(|| {
            Error::structural(&path, &format!("initial state {} belongs to another machine", initial))
        })?;
        state.initial = true;
    }

    let mut transitions = Vec::new();
    if let Some(container) = element.child("TRANSITIONS") {
        for item in &container.children {
            if item.local_name() != "TRANSITION" {
                kept.push(opaque(item, &path));
                continue;
            }
            let name = item.short_name().map(str::to_string);
            let owner = match &name {
                Some(n) => path.join(n),
                None => path.clone(),
            };
            let source =
                ctx.required_ref(item, &owner, "SOURCE-STATE-REF", package, is_state, "a state")?;
            let target =
                ctx.required_ref(item, &owner, "TARGET-STATE-REF", package, is_state, "a state")?;
            let event = ctx.optional_ref(
                item,
                "EVENT-REF",
                package,
                |k| matches!(k, EntityKind::Event(_)),
                "an event",
            )?;
            let guard = item
                .child("GUARD")
                .map(Element::collected_text)
                .filter(|g| !g.is_empty());
            kept.extend(
                item.children
                    .iter()
                    .filter(|child| !TRANSITION_CHILDREN.contains(&child.local_name()))
                    .map(|child| opaque(child, &owner)),
            );
            transitions.push(Transition {
                name,
                source,
                target,
                event,
                guard,
            });
        }
    }

    debug!(
        path:% = path,
        states = states.len(),
        transitions = transitions.len(),
        opaque = kept.len();
        "Built state machine"
    );
    Ok(StateMachine {
        name,
        path,
        states,
        transitions,
        opaque: kept,
    })
}
