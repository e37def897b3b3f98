//! Requirement annotation collection

use indexmap::IndexMap;
use log::{debug, trace};

use super::{Scope, Walk, walk};
use crate::error::Result;
use crate::model::{Entity, RequirementAnnotation, RequirementMapping, ShortNamePath};
use crate::xml::Element;

/// Attach every requirement annotation to its nearest identifiable ancestor
///
/// Annotations without such an ancestor are returned. Every annotation records
/// its document position. Annotations without an id receive `AUTO-REQ-<n>`,
/// numbered in document order from 1.
pub(super) fn collect_annotations(
    root: &Element,
    mapping: &RequirementMapping,
    index: &mut IndexMap<ShortNamePath, Entity>,
) -> Result<Vec<RequirementAnnotation>> {
    let mut unowned = Vec::new();
    let mut generated = 0usize;
    let mut attached = 0usize;
    let mut position = 0usize;

    walk(root, &Scope::default(), &mut |element, scope| {
        let found = if mapping.is_annotation_tag(element.local_name()) {
            Some(read_annotation(element, mapping))
        } else if is_requirement_group(element, mapping) {
            Some(read_group(element))
        } else {
            None
        };
        let Some((id, description)) = found else {
            return Ok(Walk::Descend);
        };

        let id = id.unwrap_or_else(|| {
            generated += 1;
            format!("AUTO-REQ-{}", generated)
        });
        trace!(id = id.as_str(), owner:% = scope.parent; "Found requirement annotation");
        let annotation =
            RequirementAnnotation::new(id, description, scope.parent.clone()).at_position(position);
        position += 1;
        match index.get_mut(&scope.parent) {
            Some(entity) => {
                entity.annotations.push(annotation);
                attached += 1;
            }
            None => unowned.push(annotation),
        }
        Ok(Walk::Skip)
    })?;

    debug!(attached, unowned = unowned.len(), generated; "Collected requirement annotations");
    Ok(unowned)
}

/// Id and description of an annotation element
fn read_annotation(element: &Element, mapping: &RequirementMapping) -> (Option<String>, String) {
    let id = mapping
        .id_children
        .iter()
        .find_map(|child| element.child_text(child))
        .map(str::to_string);
    let description = mapping
        .description_children
        .iter()
        .find_map(|child| element.child(child))
        .map(Element::collected_text)
        .or_else(|| element.text.clone())
        .unwrap_or_default();
    (id, description)
}

fn is_requirement_group(element: &Element, mapping: &RequirementMapping) -> bool {
    element.local_name() == "SDG"
        && match (&mapping.sdg_gid, element.attribute("GID")) {
            (Some(expected), Some(gid)) => gid == expected,
            _ => false,
        }
}

/// Id and description of a `<SDG>` whose `<SD>` entries are keyed by `GID`
fn read_group(element: &Element) -> (Option<String>, String) {
    let value = |key: &str| {
        element
            .children_named("SD")
            .find(|sd| {
                sd.attribute("GID")
                    .is_some_and(|gid| gid.eq_ignore_ascii_case(key))
            })
            .and_then(|sd| sd.text.clone())
    };
    let id = value("ID");
    let description = value("Description").unwrap_or_default();
    (id, description)
}
