//! Software component types: ports, behaviors, prototypes and connectors

use log::{debug, trace};

use super::{BuildContext, behavior, identify, opaque};
use crate::error::{Error, Result};
use crate::model::{
    ComponentKind, ComponentPrototype, Connector, ConnectorKind, EntityKind, Port, PortDirection,
    PortEndpoint, ShortNamePath, SoftwareComponent,
};
use crate::xml::Element;

fn is_component(kind: &EntityKind) -> bool {
    matches!(kind, EntityKind::Component(_))
}

fn is_interface(kind: &EntityKind) -> bool {
    matches!(kind, EntityKind::Interface(_))
}

fn is_port(kind: &EntityKind) -> bool {
    matches!(kind, EntityKind::Port(_))
}

pub(super) fn build_component(
    element: &Element,
    package: &ShortNamePath,
    kind: ComponentKind,
    ctx: &BuildContext<'_>,
) -> Result<SoftwareComponent> {
    let (name, path) = identify(element, package)?;
    let mut component = SoftwareComponent::new(name, path.clone(), kind);

    for child in &element.children {
        match child.local_name() {
            "SHORT-NAME" => {}
            "PORTS" => {
                for port in &child.children {
                    match build_port(port, &path, package, ctx)? {
                        Some(port) => component.ports.push(port),
                        None => component.opaque.push(opaque(port, &path)),
                    }
                }
            }
            "INTERNAL-BEHAVIORS" => {
                for item in &child.children {
                    if EntityKind::classify(item.local_name()) != EntityKind::InternalBehavior {
                        component.opaque.push(opaque(item, &path));
                        continue;
                    }
                    if component.internal_behavior.is_some() {
                        return Err(Error::structural(
                            &path,
                            "component declares more than one internal behavior",
                        ));
                    }
                    component.internal_behavior =
                        Some(behavior::build_behavior(item, &path, package, ctx)?);
                }
            }
            "COMPONENTS" => {
                for item in &child.children {
                    if item.local_name() == "SW-COMPONENT-PROTOTYPE" {
                        component
                            .prototypes
                            .push(build_prototype(item, &path, package, ctx)?);
                    } else {
                        component.opaque.push(opaque(item, &path));
                    }
                }
            }
            "CONNECTORS" => {
                for item in &child.children {
                    match build_connector(item, &path, package, ctx)? {
                        Some(connector) => component.connectors.push(connector),
                        None => component.opaque.push(opaque(item, &path)),
                    }
                }
            }
            _ => component.opaque.push(opaque(child, &path)),
        }
    }

    debug!(
        path:% = component.path,
        ports = component.ports.len(),
        prototypes = component.prototypes.len(),
        connectors = component.connectors.len(),
        behavior = component.internal_behavior.is_some();
        "Built component"
    );
    Ok(component)
}

/// Build a port; `None` for port kinds that are kept opaque
fn build_port(
    element: &Element,
    component: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<Option<Port>> {
    let (direction, interface_ref) = match element.local_name() {
        "P-PORT-PROTOTYPE" => (PortDirection::Provided, "PROVIDED-INTERFACE-TREF"),
        "R-PORT-PROTOTYPE" => (PortDirection::Required, "REQUIRED-INTERFACE-TREF"),
        _ => return Ok(None),
    };
    let (name, path) = identify(element, component)?;
    let interface = ctx.required_ref(
        element,
        &path,
        interface_ref,
        package,
        is_interface,
        "an interface",
    )?;
    trace!(path:% = path, interface:% = interface; "Built port");
    Ok(Some(Port {
        name,
        path,
        direction,
        interface,
    }))
}

fn build_prototype(
    element: &Element,
    composition: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<ComponentPrototype> {
    let (name, path) = identify(element, composition)?;
    let component_type =
        ctx.required_ref(element, &path, "TYPE-TREF", package, is_component, "a component type")?;
    Ok(ComponentPrototype {
        name,
        path,
        component_type,
    })
}

/// Build a connector; `None` for connector kinds that are kept opaque
fn build_connector(
    element: &Element,
    composition: &ShortNamePath,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<Option<Connector>> {
    let tag = element.local_name();
    if tag != "ASSEMBLY-SW-CONNECTOR" && tag != "DELEGATION-SW-CONNECTOR" {
        return Ok(None);
    }
    let (name, path) = identify(element, composition)?;

    let kind = if tag == "ASSEMBLY-SW-CONNECTOR" {
        let provider = endpoint_child(
            element,
            &path,
            "PROVIDER-IREF",
            PortDirection::Provided,
            package,
            ctx,
        )?;
        let requester = endpoint_child(
            element,
            &path,
            "REQUESTER-IREF",
            PortDirection::Required,
            package,
            ctx,
        )?;
        ConnectorKind::Assembly {
            provider,
            requester,
        }
    } else {
        let iref = element
            .child("INNER-PORT-IREF")
            .ok_or_else(|| Error::missing_child(tag, "INNER-PORT-IREF", Some(&path)))?;
        // The instance ref is wrapped in an R- or P- specific element
        let instance = iref.children.first().unwrap_or(iref);
        let direction = if instance.local_name().starts_with("P-") {
            PortDirection::Provided
        } else {
            PortDirection::Required
        };
        let inner = endpoint(instance, &path, direction, package, ctx)?;
        let outer_port =
            ctx.required_ref(element, &path, "OUTER-PORT-REF", package, is_port, "a port")?;
        ConnectorKind::Delegation { inner, outer_port }
    };

    Ok(Some(Connector { name, path, kind }))
}

fn endpoint_child(
    connector: &Element,
    connector_path: &ShortNamePath,
    child: &str,
    direction: PortDirection,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<PortEndpoint> {
    let iref = connector
        .child(child)
        .ok_or_else(|| Error::missing_child(connector.local_name(), child, Some(connector_path)))?;
    endpoint(iref, connector_path, direction, package, ctx)
}

/// Resolve a `CONTEXT-COMPONENT-REF` / `TARGET-*-PORT-REF` pair
fn endpoint(
    iref: &Element,
    connector_path: &ShortNamePath,
    direction: PortDirection,
    package: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<PortEndpoint> {
    let (port_ref, expected) = match direction {
        PortDirection::Provided => ("TARGET-P-PORT-REF", "a provided port"),
        PortDirection::Required => ("TARGET-R-PORT-REF", "a required port"),
    };
    let prototype = ctx.required_ref(
        iref,
        connector_path,
        "CONTEXT-COMPONENT-REF",
        package,
        |k| *k == EntityKind::ComponentPrototype,
        "a component prototype",
    )?;
    let port = ctx.required_ref(
        iref,
        connector_path,
        port_ref,
        package,
        |k| *k == EntityKind::Port(direction),
        expected,
    )?;
    // External prototypes are not in the map; the port's owner is the type
    let component = match ctx.prototype_type(&prototype) {
        Some(component_type) => component_type.clone(),
        None => port.parent().unwrap_or_default(),
    };
    Ok(PortEndpoint {
        prototype,
        component,
        port,
    })
}
