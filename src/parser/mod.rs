//! Parser module — dispatch by file extension.

pub mod merge;
pub mod xml;

use crate::model::Element;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parse a documentation file into its root element based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<Element> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("xml") => xml::parse(content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
