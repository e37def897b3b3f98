//! ARXML model builder
//!
//! Turns the generic element tree into a [`Model`] in two passes:
//!
//! 1. **Index**: every element with a `SHORT-NAME` child is recorded under its
//!    short-name path. Nothing is resolved yet, so references may point at
//!    elements defined later in the document.
//! 2. **Resolve**: every `*-REF` / `*-TREF` element anywhere in the tree is
//!    checked against the completed index, then packages, components,
//!    behaviors and state machines are materialized with their references
//!    resolved and their target kinds checked.
//!
//! The finished model is handed to the validator before it is returned.

mod annotation;
mod behavior;
mod component;
mod index;
mod package;

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::model::*;
use crate::validator;
use crate::xml::{self, Element};

/// Parse raw ARXML bytes into a model
pub fn parse_arxml(bytes: &[u8], config: &ParserConfig) -> Result<Model> {
    let root = xml::parse_document(bytes)?;
    build_model(&root, config)
}

/// Build a model from a parsed element tree
pub fn build_model(root: &Element, config: &ParserConfig) -> Result<Model> {
    if root.local_name() != "AUTOSAR" {
        return Err(Error::StructuralViolation(format!(
            "Root element must be <AUTOSAR>, found <{}>",
            root.local_name()
        )));
    }
    if root.tag.namespace.as_deref() != Some(AUTOSAR_NAMESPACE) {
        debug!(namespace:? = root.tag.namespace; "Root element is not in the AUTOSAR R4 namespace");
    }

    // Pass 1
    let mut entities = index::build_index(root)?;
    info!(entities = entities.len(); "Indexed identifiable elements");

    // Pass 2
    let external_references = index::check_references(root, &entities, config)?;
    let ctx = BuildContext::new(root, &entities, config)?;
    let packages = package::build_packages(root, &ctx)?;

    let unowned_annotations =
        annotation::collect_annotations(root, config.requirement_mapping(), &mut entities)?;

    let model = Model {
        schema_namespace: root.tag.namespace.clone(),
        packages,
        index: entities,
        unowned_annotations,
        external_references,
    };

    validator::validate_model(&model)?;
    info!(
        packages = model.all_packages().len(),
        components = model.components().len();
        "Model built"
    );
    Ok(model)
}

/// Position of an element in the package hierarchy
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    /// Path of the nearest identifiable ancestor
    pub parent: ShortNamePath,
    /// Path of the enclosing package
    pub package: ShortNamePath,
}

impl Scope {
    fn enter(&self, element: &Element) -> Scope {
        match element.short_name() {
            Some(name) => {
                let path = self.parent.join(name);
                let package = if element.local_name() == "AR-PACKAGE" {
                    path.clone()
                } else {
                    self.package.clone()
                };
                Scope {
                    parent: path,
                    package,
                }
            }
            None => self.clone(),
        }
    }
}

/// Whether a walk descends into an element's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Walk {
    Descend,
    Skip,
}

/// Depth-first pre-order walk that tracks the short-name scope
pub(crate) fn walk<'e, F>(element: &'e Element, scope: &Scope, visit: &mut F) -> Result<()>
where
    F: FnMut(&'e Element, &Scope) -> Result<Walk>,
{
    if visit(element, scope)? == Walk::Skip {
        return Ok(());
    }
    let inner = scope.enter(element);
    for child in &element.children {
        walk(child, &inner, visit)?;
    }
    Ok(())
}

/// Whether an element is a short-name-path reference
pub(crate) fn is_reference(element: &Element) -> bool {
    let tag = element.local_name();
    (tag.ends_with("-REF") || tag.ends_with("-TREF"))
        && element.children.is_empty()
        && element.text.is_some()
}

/// Turn reference text into an absolute path
///
/// Paths without a leading slash are relative to the enclosing package.
pub(crate) fn reference_path(text: &str, package: &ShortNamePath) -> ShortNamePath {
    let relative = ShortNamePath::parse(text);
    if text.trim_start().starts_with('/') {
        relative
    } else {
        package.join_path(&relative)
    }
}

/// Name and path of an identifiable element
pub(crate) fn identify(element: &Element, parent: &ShortNamePath) -> Result<(String, ShortNamePath)> {
    let name = element
        .short_name()
        .ok_or_else(|| Error::missing_child(element.local_name(), "SHORT-NAME", Some(parent)))?;
    Ok((name.to_string(), parent.join(name)))
}

/// Keep an unsupported element verbatim
pub(crate) fn opaque(element: &Element, parent: &ShortNamePath) -> OpaqueElement {
    trace!(tag = element.local_name(), parent:% = parent; "Keeping unsupported element");
    OpaqueElement {
        tag: element.tag.clone(),
        path: element.short_name().map(|name| parent.join(name)),
        element: element.clone(),
    }
}

/// Parse an ARXML boolean (`true`/`false`/`1`/`0`)
pub(crate) fn parse_bool(element: &Element, path: &ShortNamePath) -> Result<bool> {
    match element.text.as_deref().map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        other => Err(Error::structural(
            path,
            &format!(
                "<{}> must be 'true' or 'false', got '{}'",
                element.local_name(),
                other.unwrap_or("")
            ),
        )),
    }
}

/// Shared state for pass 2
pub(crate) struct BuildContext<'a> {
    index: &'a IndexMap<ShortNamePath, Entity>,
    config: &'a ParserConfig,
    /// Component type of every prototype in the document
    prototypes: HashMap<ShortNamePath, ShortNamePath>,
}

impl<'a> BuildContext<'a> {
    fn new(
        root: &Element,
        index: &'a IndexMap<ShortNamePath, Entity>,
        config: &'a ParserConfig,
    ) -> Result<Self> {
        let mut ctx = Self {
            index,
            config,
            prototypes: HashMap::new(),
        };
        let mut prototypes = HashMap::new();
        walk(root, &Scope::default(), &mut |element, scope| {
            if element.local_name() == "SW-COMPONENT-PROTOTYPE" {
                let (_, path) = identify(element, &scope.parent)?;
                let component_type = ctx.required_ref(
                    element,
                    &path,
                    "TYPE-TREF",
                    &scope.package,
                    |k| matches!(k, EntityKind::Component(_)),
                    "a component type",
                )?;
                prototypes.insert(path, component_type);
                return Ok(Walk::Skip);
            }
            Ok(Walk::Descend)
        })?;
        ctx.prototypes = prototypes;
        Ok(ctx)
    }

    /// Component type instantiated by a prototype
    pub(crate) fn prototype_type(&self, prototype: &ShortNamePath) -> Option<&ShortNamePath> {
        self.prototypes.get(prototype)
    }

    /// Resolve reference text to a known or external path
    pub(crate) fn resolve(&self, text: &str, package: &ShortNamePath) -> Result<ShortNamePath> {
        let path = reference_path(text, package);
        if self.index.contains_key(&path) || self.config.is_external(&path) {
            Ok(path)
        } else {
            Err(Error::UnresolvedReference(path))
        }
    }

    /// Resolve a reference element and check the kind of its target
    ///
    /// External targets are accepted without a kind check.
    pub(crate) fn resolve_ref(
        &self,
        element: &Element,
        package: &ShortNamePath,
        expected: impl Fn(&EntityKind) -> bool,
        expected_desc: &str,
    ) -> Result<ShortNamePath> {
        let text = element.text.as_deref().ok_or_else(|| {
            Error::StructuralViolation(format!("Reference '<{}>' is empty", element.local_name()))
        })?;
        let path = self.resolve(text, package)?;
        if let Some(entity) = self.index.get(&path) {
            if !expected(&entity.kind) {
                return Err(Error::wrong_target(
                    element.local_name(),
                    &path,
                    expected_desc,
                    &entity.kind.describe(),
                ));
            }
        }
        Ok(path)
    }

    /// Resolve a mandatory reference child of `owner`
    pub(crate) fn required_ref(
        &self,
        owner: &Element,
        owner_path: &ShortNamePath,
        child: &str,
        package: &ShortNamePath,
        expected: impl Fn(&EntityKind) -> bool,
        expected_desc: &str,
    ) -> Result<ShortNamePath> {
        let element = owner
            .child(child)
            .ok_or_else(|| Error::missing_child(owner.local_name(), child, Some(owner_path)))?;
        self.resolve_ref(element, package, expected, expected_desc)
    }

    /// Resolve an optional reference child of `owner`
    pub(crate) fn optional_ref(
        &self,
        owner: &Element,
        child: &str,
        package: &ShortNamePath,
        expected: impl Fn(&EntityKind) -> bool,
        expected_desc: &str,
    ) -> Result<Option<ShortNamePath>> {
        owner
            .child(child)
            .map(|element| self.resolve_ref(element, package, expected, expected_desc))
            .transpose()
    }
}

/// First descendant whose local name is one of `tags`
pub(crate) fn find_descendant<'e>(element: &'e Element, tags: &[&str]) -> Option<&'e Element> {
    element
        .descendants()
        .skip(1)
        .find(|e| tags.contains(&e.local_name()))
}
