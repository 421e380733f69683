//! XML documentation reader.
//!
//! Builds an owned [`Element`] tree from the `roxmltree` DOM. Comments and
//! processing instructions are dropped; text nodes are kept verbatim.

use crate::model::{Element, Node};
use anyhow::{Context, Result};
use roxmltree::{Document, ParsingOptions};

/// Parse XML text and return the root element.
pub fn parse(content: &str) -> Result<Element> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options).context("failed to parse XML")?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        element.set_attr(attr.name(), attr.value());
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::Text(text.to_string()));
            }
        }
    }
    element
}
