//! Data model for documentation trees — format-agnostic.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A node in the document tree: either a child element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A single element: tag name, attributes and ordered mixed content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attribute name → value. Keys are unordered in the source, so they are
    /// kept sorted here for stable output.
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child element append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder-style text append.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given tag.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == tag)
    }

    /// Concatenation of the element's own direct text nodes.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All text below this element, including nested elements.
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.deep_text()),
            }
        }
        out
    }

    /// Descendant elements with the given tag in document order (pre-order,
    /// excluding `self`).
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_descendants(self, tag, &mut found);
        found
    }

    /// Mutable counterpart of [`Element::descendants_named`], applied via callback.
    pub fn for_each_descendant_mut(&mut self, tag: &str, f: &mut dyn FnMut(&mut Element)) {
        for node in &mut self.children {
            if let Node::Element(e) = node {
                if e.name == tag {
                    f(e);
                }
                e.for_each_descendant_mut(tag, f);
            }
        }
    }
}

fn collect_descendants<'a>(el: &'a Element, tag: &str, found: &mut Vec<&'a Element>) {
    for child in el.elements() {
        if child.name == tag {
            found.push(child);
        }
        collect_descendants(child, tag, found);
    }
}

/// Output of the corrector for one namespace: the shared assembly element
/// plus that namespace's corrected members in encounter order.
#[derive(Debug, Clone, Default)]
pub struct NamespaceDocument {
    /// `None` when the source had no `assembly` element.
    pub assembly: Option<Arc<Element>>,
    pub members: Vec<Element>,
}
