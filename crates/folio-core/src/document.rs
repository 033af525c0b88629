/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Reading and writing serialized document trees.
 */

//! Serialized document trees.
//!
//! Documents cross the process boundary as the JSON the MDX parser emits.
//! Only the root is checked here; everything below it is kept as-is.

use folio_mdast::{Node, NodeKind};

use crate::Result;
use crate::error::FolioError;

/// Parse a JSON document tree, requiring a `root` node at the top.
pub fn parse_tree(json: &str) -> Result<Node> {
    let tree: Node = serde_json::from_str(json)?;
    if !tree.is(&NodeKind::Root) {
        return Err(FolioError::NotRoot(tree.kind.to_string()));
    }
    Ok(tree)
}

/// Serialize a tree back to JSON.
pub fn to_json_string(tree: &Node, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        serde_json::to_string(tree)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let tree = parse_tree(r#"{"type":"root","children":[{"type":"yaml","value":"a: 1"}]}"#)
            .unwrap();
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].kind, NodeKind::Yaml);
    }

    #[test]
    fn test_rejects_non_root() {
        let err = parse_tree(r#"{"type":"paragraph","children":[]}"#).unwrap_err();
        assert!(matches!(err, FolioError::NotRoot(ref kind) if kind == "paragraph"));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_tree("{not json").unwrap_err();
        assert!(matches!(err, FolioError::Json(_)));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let input = r#"{"type":"root","children":[{"type":"heading","depth":2,"children":[{"type":"text","value":"Hi"}],"position":{"start":{"line":1,"column":1,"offset":0}}}],"position":{"start":{"line":1,"column":1,"offset":0}}}"#;
        let tree = parse_tree(input).unwrap();
        let output = to_json_string(&tree, false).unwrap();

        let before: serde_json::Value = serde_json::from_str(input).unwrap();
        let after: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(before, after);
    }
}
