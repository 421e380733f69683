//! Member correction and namespace grouping.
//!
//! Rewrites the identifying attributes of every `member` element and groups
//! the corrected members into one [`NamespaceDocument`] per namespace. The
//! input tree is left untouched: corrected members are fresh clones.

use crate::identifier::{strip_generic_suffix, IdentifierError, MemberId, MemberKind};
use crate::model::{Element, NamespaceDocument};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const ATTR_NAME: &str = "name";
pub const ATTR_MEMBER_TYPE: &str = "membertype";
pub const ATTR_NAMESPACE: &str = "namespace";
/// `T:<namespace>.<base name>` on type members, for link resolution only.
pub const ATTR_CROSSREF: &str = "crossref";
pub const ATTR_CREF: &str = "cref";

/// Namespace documents keyed by namespace (`""` is the global namespace).
pub type Namespaces = BTreeMap<String, NamespaceDocument>;

/// Correct every member below `tree` and group the results by namespace.
///
/// Members whose identifier cannot be decoded are skipped with a warning.
pub fn correct(tree: &Element) -> Namespaces {
    debug!("started member correction");

    let mut grouped: BTreeMap<String, Vec<Element>> = BTreeMap::new();
    let mut skipped = 0usize;
    for member in tree.descendants_named("member") {
        match correct_member(member) {
            Ok((namespace, corrected)) => grouped.entry(namespace).or_default().push(corrected),
            Err(e) => {
                skipped += 1;
                warn!("skipping member: {}", e);
            }
        }
    }
    debug!(
        namespaces = grouped.len(),
        skipped, "finished member correction"
    );

    let assembly = tree.elements_named("assembly").next().cloned().map(Arc::new);
    if assembly.is_none() {
        info!("assembly element not found");
    }

    grouped
        .into_iter()
        .map(|(namespace, members)| {
            let doc = NamespaceDocument {
                assembly: assembly.clone(),
                members,
            };
            (namespace, doc)
        })
        .collect()
}

/// Correct a single `member` element, returning its grouping namespace and
/// the corrected copy.
pub fn correct_member(member: &Element) -> Result<(String, Element), IdentifierError> {
    let id = MemberId::parse(member.attr(ATTR_NAME).unwrap_or_default())?;

    let mut corrected = member.clone();
    corrected.set_attr(ATTR_MEMBER_TYPE, id.kind.as_str());
    corrected.set_attr(ATTR_NAMESPACE, id.namespace.as_str());
    corrected.set_attr(ATTR_NAME, display_name(&id, member));

    if id.member_kind() == Some(MemberKind::Type) {
        corrected.set_attr(ATTR_CROSSREF, crossref(&id));
    }

    corrected.for_each_descendant_mut("see", &mut |see: &mut Element| {
        if let Some(cref) = see.attr(ATTR_CREF) {
            let stripped = strip_generic_suffix(cref).to_string();
            see.set_attr(ATTR_CREF, stripped);
        }
    });

    Ok((id.namespace, corrected))
}

/// Display name with generic parameters written as `Base|A, B|`.
///
/// Without `typeparam` children a single `?` placeholder is used whatever
/// the declared arity.
fn display_name(id: &MemberId, member: &Element) -> String {
    if !id.is_generic() {
        return id.name.clone();
    }
    let params: Vec<&str> = member
        .elements_named("typeparam")
        .filter_map(|tp| tp.attr(ATTR_NAME))
        .collect();
    let joined = if params.is_empty() {
        "?".to_string()
    } else {
        params.join(", ")
    };
    format!("{}|{}|", id.base_name(), joined)
}

/// `<kind>:<namespace>.<base name>`; the global namespace leaves a bare
/// leading dot (`T:.Widget`).
fn crossref(id: &MemberId) -> String {
    format!("{}:{}.{}", id.kind, id.namespace, id.base_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> Element {
        Element::new("member").with_attr("name", id)
    }

    fn tree(members: Vec<Element>) -> Element {
        let mut doc = Element::new("doc")
            .with_child(Element::new("assembly").with_child(Element::new("name").with_text("Lib")));
        let mut list = Element::new("members");
        for m in members {
            list = list.with_child(m);
        }
        doc = doc.with_child(list);
        doc
    }

    #[test]
    fn type_member_attributes() {
        let (ns, m) = correct_member(&member("T:A.B.C")).unwrap();
        assert_eq!(ns, "A.B");
        assert_eq!(m.attr("membertype"), Some("T"));
        assert_eq!(m.attr("namespace"), Some("A.B"));
        assert_eq!(m.attr("name"), Some("C"));
        assert_eq!(m.attr("crossref"), Some("T:A.B.C"));
    }

    #[test]
    fn method_member_attributes() {
        let (ns, m) = correct_member(&member("M:A.B.C.Method(System.Int32)")).unwrap();
        assert_eq!(ns, "A.B");
        assert_eq!(m.attr("membertype"), Some("M"));
        assert_eq!(m.attr("namespace"), Some("A.B"));
        assert_eq!(m.attr("name"), Some("Method"));
        assert_eq!(m.attr("crossref"), None);
    }

    #[test]
    fn generic_type_with_typeparams() {
        let el = member("T:A.Dict`2")
            .with_child(Element::new("typeparam").with_attr("name", "TKey"))
            .with_child(Element::new("typeparam").with_attr("name", "TValue"));
        let (_, m) = correct_member(&el).unwrap();
        assert_eq!(m.attr("name"), Some("Dict|TKey, TValue|"));
        assert_eq!(m.attr("crossref"), Some("T:A.Dict"));
    }

    #[test]
    fn global_type_crossref_keeps_separator() {
        let (ns, m) = correct_member(&member("T:Widget")).unwrap();
        assert_eq!(ns, "");
        assert_eq!(m.attr("crossref"), Some("T:.Widget"));
    }

    #[test]
    fn generic_type_without_typeparams() {
        let (_, m) = correct_member(&member("T:A.Dict`2")).unwrap();
        assert_eq!(m.attr("name"), Some("Dict|?|"));
    }

    #[test]
    fn see_cref_loses_arity() {
        let el = member("M:A.B.C.Run").with_child(
            Element::new("summary").with_child(Element::new("see").with_attr("cref", "T:A.B`1")),
        );
        let (_, m) = correct_member(&el).unwrap();
        assert_eq!(m.descendants_named("see")[0].attr("cref"), Some("T:A.B"));
    }

    #[test]
    fn input_is_not_mutated() {
        let el = member("T:A.B.C");
        let _ = correct_member(&el).unwrap();
        assert_eq!(el.attr("name"), Some("T:A.B.C"));
        assert_eq!(el.attr("membertype"), None);
    }

    #[test]
    fn grouping_preserves_encounter_order() {
        let docs = correct(&tree(vec![
            member("T:A.First"),
            member("T:B.Other"),
            member("M:A.First.Go"),
            member("P:A.First.Size"),
        ]));
        assert_eq!(docs.len(), 2);
        let names: Vec<_> = docs["A"]
            .members
            .iter()
            .filter_map(|m| m.attr("name"))
            .collect();
        assert_eq!(names, vec!["First", "Go", "Size"]);
        assert!(docs["A"].assembly.is_some());
    }

    #[test]
    fn assembly_is_shared() {
        let docs = correct(&tree(vec![member("T:A.X"), member("T:B.Y")]));
        let a = docs["A"].assembly.as_ref().unwrap();
        let b = docs["B"].assembly.as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn missing_assembly_is_not_fatal() {
        let doc = Element::new("doc").with_child(
            Element::new("members")
                .with_child(member("T:A.X"))
                .with_child(member("T:Y")),
        );
        let docs = correct(&doc);
        assert_eq!(docs.len(), 2);
        assert!(docs[""].assembly.is_none());
        assert!(docs["A"].assembly.is_none());
    }

    #[test]
    fn malformed_identifiers_are_skipped() {
        let docs = correct(&tree(vec![
            member("garbage"),
            member("M:NoType()"),
            Element::new("member"),
            member("T:A.Ok"),
        ]));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs["A"].members.len(), 1);
    }

    #[test]
    fn unknown_kind_is_grouped() {
        let docs = correct(&tree(vec![member("N:A.B.C")]));
        assert_eq!(docs["A"].members[0].attr("membertype"), Some("N"));
    }
}
