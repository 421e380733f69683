//! Member renderer: one markdown section per documented member.

use super::{NodeRenderer, RendererPool};
use crate::correct::{ATTR_MEMBER_TYPE, ATTR_NAME, ATTR_NAMESPACE};
use crate::identifier::MemberKind;
use crate::model::Element;

pub struct MemberRenderer;

impl NodeRenderer for MemberRenderer {
    fn render(&self, pool: &RendererPool, element: &Element) -> Option<String> {
        let name = element.attr(ATTR_NAME)?;
        let kind: MemberKind = element.attr(ATTR_MEMBER_TYPE)?.parse().ok()?;
        let namespace = element.attr(ATTR_NAMESPACE)?;

        let section = Section {
            title: title(namespace, name),
            body: pool.render_children(element),
        };
        Some(section.render(kind, pool.nl()))
    }
}

/// Heading text and body of a member section.
struct Section {
    title: String,
    body: String,
}

impl Section {
    fn render(&self, kind: MemberKind, nl: &str) -> String {
        let Section { title, body } = self;
        match kind {
            MemberKind::Type => format!("---{nl}#### Type: {title}{nl}{nl}{body}{nl}{nl}"),
            MemberKind::Method | MemberKind::Property | MemberKind::Field | MemberKind::Event => {
                format!("#### {}: {title}{nl}{nl}{nl}{body}{nl}", kind.label())
            }
        }
    }
}

/// Anchor id of a member: `namespace.name`, lowercased.
pub fn anchor_id(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name).to_lowercase()
}

fn title(namespace: &str, name: &str) -> String {
    format!("<a name=\"{}\"></a>{}", anchor_id(namespace, name), name)
}
