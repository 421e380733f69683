//! doctomd — convert compiler-generated XML API documentation into
//! per-namespace markdown.
//!
//! The pipeline has two stages:
//!
//! 1. [`correct`] decodes the mangled member identifiers (`T:Foo.Bar`,
//!    `M:Foo.Bar.Baz(System.Int32)`) and groups members by namespace.
//! 2. [`render`] turns each namespace document into markdown through a pool
//!    of tag-keyed renderers.

pub mod correct;
pub mod identifier;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

use anyhow::Result;
use correct::Namespaces;
use render::{RenderOptions, RendererPool};
use std::collections::BTreeMap;

pub use correct::correct;
pub use model::{Element, NamespaceDocument, Node};
pub use render::render_document;

/// Render every namespace document, keyed by namespace.
pub fn render_all(namespaces: &Namespaces, options: RenderOptions) -> BTreeMap<String, String> {
    let pool = RendererPool::with_defaults(options);
    namespaces
        .iter()
        .map(|(namespace, doc)| (namespace.clone(), render_document(&pool, doc)))
        .collect()
}

/// Parse, correct and render an XML documentation file in one go.
pub fn convert_str(xml: &str, options: RenderOptions) -> Result<BTreeMap<String, String>> {
    let tree = parser::xml::parse(xml)?;
    Ok(render_all(&correct(&tree), options))
}

/// Output file stem used for the global (empty) namespace.
pub const GLOBAL_OUTPUT_NAME: &str = "_global";

/// Output file stem for a namespace.
pub fn output_name(namespace: &str) -> &str {
    if namespace.is_empty() {
        GLOBAL_OUTPUT_NAME
    } else {
        namespace
    }
}
