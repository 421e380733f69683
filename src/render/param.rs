//! Parameter renderer.

use super::{NodeRenderer, RendererPool};
use crate::model::Element;

pub struct ParamRenderer;

impl NodeRenderer for ParamRenderer {
    fn render(&self, pool: &RendererPool, element: &Element) -> Option<String> {
        let name = element.attr("name")?;

        // Own text is used verbatim, children are appended after it.
        let mut body = element.text();
        body.push_str(&pool.render_children(element));

        Some(format!("\tParameter {}: {} {}", name, body, pool.nl()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Newline, RenderOptions};

    fn pool() -> RendererPool {
        RendererPool::with_defaults(RenderOptions {
            newline: Newline::Lf,
            toc: false,
        })
    }

    #[test]
    fn plain_text() {
        let el = Element::new("param").with_attr("name", "x").with_text("a value");
        assert_eq!(pool().render(&el), "\tParameter x: a value \n");
    }

    #[test]
    fn own_text_is_kept_verbatim() {
        let el = Element::new("param")
            .with_attr("name", "x")
            .with_text("\n  a  value\n");
        assert_eq!(pool().render(&el), "\tParameter x: \n  a  value\n \n");
    }

    #[test]
    fn children_follow_direct_text() {
        let el = Element::new("param")
            .with_attr("name", "s")
            .with_text("The ")
            .with_child(Element::new("c").with_text("Stream"))
            .with_text(" to read.");
        assert_eq!(pool().render(&el), "\tParameter s: The  to read.`Stream` \n");
    }

    #[test]
    fn missing_name_renders_nothing() {
        let el = Element::new("param").with_text("orphan");
        assert_eq!(pool().render(&el), "");
    }

    #[test]
    fn empty_param_still_renders() {
        let el = Element::new("param").with_attr("name", "x");
        assert_eq!(pool().render(&el), "\tParameter x:  \n");
    }
}
