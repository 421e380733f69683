//! Member index for a namespace document.
//!
//! Links point at the anchors the member renderer emits, so the index only
//! lists members that will actually be rendered.

use crate::correct::{ATTR_MEMBER_TYPE, ATTR_NAME, ATTR_NAMESPACE};
use crate::identifier::MemberKind;
use crate::model::Element;
use crate::render::member::anchor_id;

/// Generate a link to an anchor within the same document.
pub fn render_toc_link(text: &str, anchor: &str) -> String {
    format!("[{}](#{})", text, anchor)
}

/// Generate a TOC list item, prefixed with the member kind.
pub fn render_toc_item(kind: MemberKind, text: &str, anchor: &str) -> String {
    format!("* {}: {}", kind.label(), render_toc_link(text, anchor))
}

/// `## Index` section over the renderable members; empty when none are.
pub fn render_index(members: &[Element], nl: &str) -> String {
    let items: Vec<String> = members
        .iter()
        .filter_map(|m| {
            let name = m.attr(ATTR_NAME)?;
            let kind: MemberKind = m.attr(ATTR_MEMBER_TYPE)?.parse().ok()?;
            let namespace = m.attr(ATTR_NAMESPACE)?;
            Some(render_toc_item(kind, name, &anchor_id(namespace, name)))
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }

    let mut output = format!("## Index{nl}{nl}");
    for item in items {
        output.push_str(&item);
        output.push_str(nl);
    }
    output.push_str(nl);
    output
}
