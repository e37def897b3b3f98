//! Pass 1 (the flat entity index) and the reference sweep of pass 2

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, trace};

use super::{Scope, Walk, is_reference, reference_path, walk};
use crate::error::{Error, Result};
use crate::model::{Entity, ParserConfig, ShortNamePath};
use crate::xml::Element;

/// Record every identifiable element under its short-name path
///
/// Two elements sharing a path are a structural violation.
pub(super) fn build_index(root: &Element) -> Result<IndexMap<ShortNamePath, Entity>> {
    let mut index = IndexMap::new();
    walk(root, &Scope::default(), &mut |element, scope| {
        if let Some(name) = element.short_name() {
            let path = scope.parent.join(name);
            match index.entry(path) {
                Entry::Occupied(entry) => {
                    return Err(Error::structural(
                        entry.key(),
                        &format!("duplicate short name on <{}>", element.local_name()),
                    ));
                }
                Entry::Vacant(entry) => {
                    trace!(path:% = entry.key(), tag = element.local_name(); "Indexed");
                    let entity = Entity::new(entry.key().clone(), element.local_name());
                    entry.insert(entity);
                }
            }
        }
        Ok(Walk::Descend)
    })?;
    Ok(index)
}

/// Check that every reference in the document names an indexed element
///
/// Returns the references accepted because they point into an external
/// package, in document order and without duplicates.
pub(super) fn check_references(
    root: &Element,
    index: &IndexMap<ShortNamePath, Entity>,
    config: &ParserConfig,
) -> Result<Vec<ShortNamePath>> {
    let mut external: Vec<ShortNamePath> = Vec::new();
    let mut checked = 0usize;
    walk(root, &Scope::default(), &mut |element, scope| {
        if !is_reference(element) {
            return Ok(Walk::Descend);
        }
        let text = element.text.as_deref().unwrap_or_default();
        let path = reference_path(text, &scope.package);
        checked += 1;
        if index.contains_key(&path) {
            return Ok(Walk::Skip);
        }
        if config.is_external(&path) {
            debug!(path:% = path, tag = element.local_name(); "Keeping external reference");
            if !external.contains(&path) {
                external.push(path);
            }
            return Ok(Walk::Skip);
        }
        Err(Error::UnresolvedReference(path))
    })?;
    debug!(checked, external = external.len(); "References resolved");
    Ok(external)
}
