//! Composition rules: prototypes and connectors

use crate::error::{Error, Result};
use crate::model::{
    ConnectorKind, EntityKind, Model, PortDirection, PortEndpoint, ShortNamePath,
    SoftwareComponent,
};

/// Check that prototypes do not instantiate their own composition
pub fn validate_prototypes(model: &Model, composition: &SoftwareComponent) -> Result<()> {
    for prototype in &composition.prototypes {
        if prototype.component_type == composition.path {
            return Err(Error::structural(
                &prototype.path,
                "composition instantiates itself",
            ));
        }
        if let Some(component_type) = model.component(&prototype.component_type) {
            if component_type
                .prototypes
                .iter()
                .any(|inner| inner.component_type == composition.path)
            {
                return Err(Error::structural(
                    &prototype.path,
                    &format!("{} and {} instantiate each other", composition.path, component_type.path),
                ));
            }
        }
    }
    Ok(())
}

/// Check connector endpoints against their prototypes and port directions
pub fn validate_connectors(model: &Model, composition: &SoftwareComponent) -> Result<()> {
    for connector in &composition.connectors {
        match &connector.kind {
            ConnectorKind::Assembly {
                provider,
                requester,
            } => {
                check_endpoint(model, composition, &connector.path, provider, PortDirection::Provided)?;
                check_endpoint(model, composition, &connector.path, requester, PortDirection::Required)?;
            }
            ConnectorKind::Delegation { inner, outer_port } => {
                let direction = match model.entity(&inner.port).map(|e| &e.kind) {
                    Some(EntityKind::Port(direction)) => *direction,
                    _ => continue,
                };
                check_endpoint(model, composition, &connector.path, inner, direction)?;
                if let Some(outer) = composition.port(outer_port) {
                    if outer.direction != direction {
                        return Err(Error::structural(
                            &connector.path,
                            &format!("delegation links ports of opposite directions ({} and {})", inner.port, outer_port),
                        ));
                    }
                } else if model.entity(outer_port).is_some() {
                    return Err(Error::structural(
                        &connector.path,
                        &format!("outer port {} is not a port of {}", outer_port, composition.path),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// An endpoint's prototype must belong to the composition and its port to
/// the prototype's component type
fn check_endpoint(
    model: &Model,
    composition: &SoftwareComponent,
    connector: &ShortNamePath,
    endpoint: &PortEndpoint,
    direction: PortDirection,
) -> Result<()> {
    if model.entity(&endpoint.prototype).is_some()
        && !composition
            .prototypes
            .iter()
            .any(|p| p.path == endpoint.prototype)
    {
        return Err(Error::structural(
            connector,
            &format!("prototype {} is not part of {}", endpoint.prototype, composition.path),
        ));
    }
    let Some(component) = model.component(&endpoint.component) else {
        return Ok(());
    };
    match component.port(&endpoint.port) {
        Some(port) if port.direction == direction => Ok(()),
        Some(_) => Err(Error::structural(
            connector,
            &format!("port {} has the wrong direction for this side of the connector", endpoint.port),
        )),
        None => Err(Error::structural(
            connector,
            &format!("port {} is not a port of {}", endpoint.port, component.path),
        )),
    }
}
