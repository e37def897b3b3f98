//! Sequence diagrams from runnables, access points and assembly connectors

use log::{debug, info};

use crate::error::{Error, Result};
use crate::model::{AccessKind, Model, PortEndpoint, ShortNamePath, SoftwareComponent};

/// One message between two component types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Position in the diagram, starting at 0
    pub index: usize,
    /// Component type owning the runnable
    pub caller: ShortNamePath,
    /// Component type on the other side of the connector
    pub callee: ShortNamePath,
    /// Accessed data element or operation, or the access point name
    pub operation: String,
    /// Runnable performing the access
    pub runnable: ShortNamePath,
    /// How the runnable uses the port
    pub access_kind: AccessKind,
    /// Port of the caller
    pub port: ShortNamePath,
}

/// Ordered interactions of a component or of the whole model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceDiagram {
    /// Component the diagram was generated for, `None` for the whole model
    pub target: Option<ShortNamePath>,
    /// Interactions ordered by component, then runnable, then access point
    pub interactions: Vec<Interaction>,
}

impl SequenceDiagram {
    /// Every component taking part, in order of first appearance
    pub fn participants(&self) -> Vec<&ShortNamePath> {
        let mut participants: Vec<&ShortNamePath> = Vec::new();
        for interaction in &self.interactions {
            for path in [&interaction.caller, &interaction.callee] {
                if !participants.contains(&path) {
                    participants.push(path);
                }
            }
        }
        participants
    }
}

/// Generate the sequence diagram for `target`, or for every component
///
/// Components are visited in package-tree order, runnables and access points
/// in declaration order. Each assembly connector attached to an accessed port
/// yields one interaction. With a target only interactions where it is the
/// caller or the callee are kept. Fails with `NoInteractionsFound` when
/// nothing is connected and with `UnresolvedReference` when `target` is not a
/// component.
pub fn generate(model: &Model, target: Option<&ShortNamePath>) -> Result<SequenceDiagram> {
    if let Some(path) = target {
        if model.component(path).is_none() {
            return Err(Error::UnresolvedReference(path.clone()));
        }
    }
    let assemblies: Vec<(&PortEndpoint, &PortEndpoint)> = model
        .connectors()
        .into_iter()
        .filter_map(|(_, connector)| connector.assembly())
        .collect();

    let mut interactions = Vec::new();
    for component in model.components() {
        let Some(behavior) = &component.internal_behavior else {
            debug!(component:% = component.path; "No internal behavior, skipping");
            continue;
        };
        for runnable in &behavior.runnables {
            for access in &runnable.access_points {
                for &(provider, requester) in &assemblies {
                    let callee = if is_endpoint(requester, component, &access.port) {
                        &provider.component
                    } else if is_endpoint(provider, component, &access.port) {
                        &requester.component
                    } else {
                        continue;
                    };
                    if target.is_some_and(|t| *t != component.path && t != callee) {
                        continue;
                    }
                    interactions.push(Interaction {
                        index: interactions.len(),
                        caller: component.path.clone(),
                        callee: callee.clone(),
                        operation: access.operation_name().to_string(),
                        runnable: runnable.path.clone(),
                        access_kind: access.kind,
                        port: access.port.clone(),
                    });
                }
            }
        }
    }

    if interactions.is_empty() {
        return Err(Error::NoInteractionsFound(
            target.cloned().unwrap_or_else(ShortNamePath::root),
        ));
    }
    info!(
        target:? = target.map(ToString::to_string),
        interactions = interactions.len();
        "Generated sequence diagram"
    );
    Ok(SequenceDiagram {
        target: target.cloned(),
        interactions,
    })
}

fn is_endpoint(endpoint: &PortEndpoint, component: &SoftwareComponent, port: &ShortNamePath) -> bool {
    &endpoint.port == port && endpoint.component == component.path
}
