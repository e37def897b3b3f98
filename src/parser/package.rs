//! Packages, interfaces and data types

use log::debug;

use super::{BuildContext, component, identify, opaque};
use crate::error::Result;
use crate::model::{
    DataType, EntityKind, Interface, InterfaceItem, InterfaceKind, Package, ShortNamePath,
};
use crate::xml::Element;

/// Build the top-level packages of the document
pub(super) fn build_packages(root: &Element, ctx: &BuildContext<'_>) -> Result<Vec<Package>> {
    let Some(container) = root.child("AR-PACKAGES") else {
        return Ok(Vec::new());
    };
    container
        .children_named("AR-PACKAGE")
        .map(|package| build_package(package, &ShortNamePath::root(), ctx))
        .collect()
}

fn build_package(
    element: &Element,
    parent: &ShortNamePath,
    ctx: &BuildContext<'_>,
) -> Result<Package> {
    let (name, path) = identify(element, parent)?;
    let mut package = Package::new(name, path.clone());

    for child in &element.children {
        match child.local_name() {
            "SHORT-NAME" => {}
            "ELEMENTS" => {
                for item in &child.children {
                    build_element(item, &mut package, ctx)?;
                }
            }
            "AR-PACKAGES" => {
                for nested in child.children_named("AR-PACKAGE") {
                    package.packages.push(build_package(nested, &path, ctx)?);
                }
            }
            _ => package.opaque.push(opaque(child, &path)),
        }
    }

    debug!(
        path:% = package.path,
        components = package.components.len(),
        interfaces = package.interfaces.len(),
        data_types = package.data_types.len(),
        opaque = package.opaque.len();
        "Built package"
    );
    Ok(package)
}

fn build_element(element: &Element, package: &mut Package, ctx: &BuildContext<'_>) -> Result<()> {
    match EntityKind::classify(element.local_name()) {
        EntityKind::Component(kind) => {
            let component = component::build_component(element, &package.path, kind, ctx)?;
            package.components.push(component);
        }
        EntityKind::Interface(kind) => {
            package.interfaces.push(build_interface(element, &package.path, kind)?);
        }
        EntityKind::DataType => {
            package.data_types.push(build_data_type(element, &package.path)?);
        }
        _ => package.opaque.push(opaque(element, &package.path)),
    }
    Ok(())
}

/// Build an interface and the items declared in any of its containers
fn build_interface(
    element: &Element,
    parent: &ShortNamePath,
    kind: InterfaceKind,
) -> Result<Interface> {
    let (name, path) = identify(element, parent)?;
    let mut items = Vec::new();
    for container in &element.children {
        for child in &container.children {
            if EntityKind::classify(child.local_name()) == EntityKind::InterfaceItem {
                let (item_name, item_path) = identify(child, &path)?;
                items.push(InterfaceItem {
                    name: item_name,
                    path: item_path,
                    tag: child.local_name().to_string(),
                });
            }
        }
    }
    Ok(Interface {
        name,
        path,
        kind,
        items,
    })
}

fn build_data_type(element: &Element, parent: &ShortNamePath) -> Result<DataType> {
    let (name, path) = identify(element, parent)?;
    Ok(DataType {
        name,
        path,
        tag: element.local_name().to_string(),
        category: element.child_text("CATEGORY").map(str::to_string),
    })
}
