//! Renderer module — tag-keyed dispatch of node renderers.
//!
//! A [`RendererPool`] maps element tags to [`NodeRenderer`]s. Renderers call
//! back into the pool for their children, so rendering a member walks the
//! whole subtree.

pub mod inline;
pub mod member;
pub mod param;

use crate::model::{Element, NamespaceDocument, Node};
use crate::toc;
use std::collections::HashMap;
use std::str::FromStr;

/// Line separator used by every template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    CrLf,
}

impl Newline {
    /// The platform line separator.
    pub fn native() -> Self {
        if cfg!(windows) {
            Newline::CrLf
        } else {
            Newline::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

impl Default for Newline {
    fn default() -> Self {
        Newline::native()
    }
}

impl FromStr for Newline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(Newline::native()),
            "lf" => Ok(Newline::Lf),
            "crlf" => Ok(Newline::CrLf),
            _ => Err(format!("unknown newline style: {}. Use native, lf, or crlf", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub newline: Newline,
    /// Prepend an index of the namespace's members.
    pub toc: bool,
}

/// Renders one kind of element.
///
/// `None` means the renderer declined the element, e.g. because a required
/// attribute is missing.
pub trait NodeRenderer: Send + Sync {
    fn render(&self, pool: &RendererPool, element: &Element) -> Option<String>;
}

impl<F> NodeRenderer for F
where
    F: Fn(&RendererPool, &Element) -> Option<String> + Send + Sync,
{
    fn render(&self, pool: &RendererPool, element: &Element) -> Option<String> {
        self(pool, element)
    }
}

/// Outcome of asking the pool to render an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No renderer is registered for the tag.
    Unregistered,
    /// A renderer exists but produced nothing for this element.
    Declined,
    Rendered(String),
}

impl Dispatch {
    /// Collapse to text; both kinds of silence become the empty string.
    pub fn into_text(self) -> String {
        match self {
            Dispatch::Rendered(text) => text,
            Dispatch::Unregistered | Dispatch::Declined => String::new(),
        }
    }
}

pub struct RendererPool {
    renderers: HashMap<&'static str, Box<dyn NodeRenderer>>,
    options: RenderOptions,
}

impl RendererPool {
    /// An empty pool. Every tag is [`Dispatch::Unregistered`].
    pub fn new(options: RenderOptions) -> Self {
        RendererPool {
            renderers: HashMap::new(),
            options,
        }
    }

    /// A pool with the member, param and inline renderers registered.
    pub fn with_defaults(options: RenderOptions) -> Self {
        let mut pool = RendererPool::new(options);
        pool.register("member", member::MemberRenderer);
        pool.register("param", param::ParamRenderer);
        inline::register(&mut pool);
        pool
    }

    /// Register `renderer` for `tag`, replacing any previous one.
    pub fn register(&mut self, tag: &'static str, renderer: impl NodeRenderer + 'static) {
        self.renderers.insert(tag, Box::new(renderer));
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn nl(&self) -> &'static str {
        self.options.newline.as_str()
    }

    pub fn dispatch(&self, element: &Element) -> Dispatch {
        match self.renderers.get(element.name.as_str()) {
            None => Dispatch::Unregistered,
            Some(renderer) => match renderer.render(self, element) {
                Some(text) if !text.is_empty() => Dispatch::Rendered(text),
                _ => Dispatch::Declined,
            },
        }
    }

    pub fn render(&self, element: &Element) -> String {
        self.dispatch(element).into_text()
    }

    /// Rendered child elements, concatenated. Text nodes are ignored.
    pub fn render_children(&self, element: &Element) -> String {
        element.elements().map(|child| self.render(child)).collect()
    }

    /// Rendered mixed content: text runs with whitespace collapsed,
    /// interleaved with rendered child elements.
    pub fn render_mixed(&self, element: &Element) -> String {
        let mut out = String::new();
        for node in &element.children {
            match node {
                Node::Text(text) => out.push_str(&collapse_whitespace(text)),
                Node::Element(child) => out.push_str(&self.render(child)),
            }
        }
        out
    }
}

/// Render one namespace document: optional index, assembly, then members.
pub fn render_document(pool: &RendererPool, doc: &NamespaceDocument) -> String {
    let mut output = String::new();

    if pool.options().toc {
        output.push_str(&toc::render_index(&doc.members, pool.nl()));
    }

    if let Some(ref assembly) = doc.assembly {
        output.push_str(&pool.render(assembly));
    }

    for member in &doc.members {
        output.push_str(&pool.render(member));
    }

    output
}

/// Replace every run of whitespace with a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
