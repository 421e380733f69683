//! Merge namespace documents coming from several input files.
//!
//! When two assemblies contribute to the same namespace, their members end
//! up in one document, in input order.

use crate::correct::Namespaces;
use std::collections::BTreeMap;
use tracing::debug;

/// Merge the per-file namespace maps into one.
///
/// Members are appended in input order; the first assembly seen for a
/// namespace is kept.
pub fn merge(docs: Vec<(String, Namespaces)>) -> Namespaces {
    let mut merged: Namespaces = BTreeMap::new();

    for (source, namespaces) in docs {
        debug!(%source, namespaces = namespaces.len(), "merging");
        for (namespace, doc) in namespaces {
            match merged.get_mut(&namespace) {
                Some(existing) => {
                    if existing.assembly.is_none() {
                        existing.assembly = doc.assembly;
                    }
                    existing.members.extend(doc.members);
                }
                None => {
                    merged.insert(namespace, doc);
                }
            }
        }
    }

    merged
}
