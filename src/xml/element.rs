//! Generic XML element tree

use std::fmt;

/// Namespace-qualified name of an element or attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Canonical namespace URI, `None` when the name is not in any namespace
    pub namespace: Option<String>,
    /// Local part of the name, without prefix
    pub local: String,
}

impl QName {
    /// Create a name in the given namespace
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.into(),
        }
    }

    /// Create a name without a namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// Check whether this name matches a namespace and local name
    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// An attribute in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: QName,
    /// Unescaped attribute value
    pub value: String,
}

/// An XML element with its ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element tag
    pub tag: QName,
    /// Attributes in document order (namespace declarations excluded)
    pub attributes: Vec<Attribute>,
    /// Child elements in document order
    pub children: Vec<Element>,
    /// Trimmed character data, `None` when the element holds no text
    pub text: Option<String>,
}

impl Element {
    /// Create an element without attributes, children or text
    pub fn new(tag: QName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Local name of the tag
    pub fn local_name(&self) -> &str {
        &self.tag.local
    }

    /// Value of the first attribute with the given local name, in any namespace
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    /// First direct child with the given local name
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag.local == local)
    }

    /// All direct children with the given local name
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag.local == local)
    }

    /// Trimmed text of the first direct child with the given local name
    pub fn child_text(&self, local: &str) -> Option<&str> {
        self.child(local).and_then(|c| c.text.as_deref())
    }

    /// The `SHORT-NAME` of this element, if it is identifiable
    pub fn short_name(&self) -> Option<&str> {
        self.child_text("SHORT-NAME")
    }

    /// All text in this subtree joined with single spaces, in document order
    pub fn collected_text(&self) -> String {
        let mut parts = Vec::new();
        collect_text(self, &mut parts);
        parts.join(" ")
    }

    /// Depth-first pre-order walk of this subtree, including `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

fn collect_text<'a>(element: &'a Element, parts: &mut Vec<&'a str>) {
    if let Some(text) = element.text.as_deref() {
        parts.extend(text.split_whitespace());
    }
    for child in &element.children {
        collect_text(child, parts);
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
