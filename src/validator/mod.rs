//! Structural validation of built models
//!
//! The builder checks that every reference resolves and points at the right
//! kind of element. The checks here cover rules that span several elements:
//! - A state machine has at least one state and exactly one initial state
//! - Transitions connect states of their own machine
//! - Access points use ports of their own component
//! - Events start runnables of their own behavior
//! - Connectors link ports of the prototypes' component types in the right
//!   direction, and delegations export through the composition's own ports
//!
//! Every failure is reported as a structural violation naming the offending
//! element path.

mod behavior;
mod component;

pub use behavior::{validate_access_points, validate_events, validate_state_machine};
pub use component::{validate_connectors, validate_prototypes};

use log::debug;

use crate::error::Result;
use crate::model::Model;

/// Validate a built model
pub fn validate_model(model: &Model) -> Result<()> {
    for component in model.components() {
        validate_prototypes(model, component)?;
        validate_connectors(model, component)?;
        if let Some(behavior) = &component.internal_behavior {
            validate_events(behavior)?;
            validate_access_points(model, component, behavior)?;
            if let Some(machine) = &behavior.state_machine {
                validate_state_machine(machine)?;
            }
        }
    }
    debug!(components = model.components().len(); "Model validated");
    Ok(())
}
