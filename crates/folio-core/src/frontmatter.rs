/*
 * frontmatter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Front matter extraction.
 */

//! Front matter extraction.
//!
//! A single pass over the tree folds every `yaml` node and every ESM node
//! into a [`FrontMatterScan`]. Nothing here mutates the tree or reports
//! anything; the scan is plain data the merge transform acts on.

use folio_error_reporting::SourceLocation;
use folio_mdast::{Node, NodeKind};
use serde_json::Value;

use crate::yaml;

/// Parsed front matter: keys in document order.
pub type FrontMatterMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterError {
    /// The text is not valid YAML
    Syntax {
        message: String,
        location: Option<SourceLocation>,
    },
    /// Valid YAML, but a scalar or a list rather than key/value pairs
    NotAMapping { found: &'static str },
}

impl std::fmt::Display for FrontMatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontMatterError::Syntax { message, .. } => write!(f, "{}", message),
            FrontMatterError::NotAMapping { found } => {
                write!(f, "expected key/value pairs, found {}", found)
            }
        }
    }
}

/// Outcome of parsing one front matter block.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatter {
    Parsed(FrontMatterMap),
    ParseError(FrontMatterError),
    /// The block is empty or holds only comments
    Absent,
}

/// Parse the raw text of a front matter block.
///
/// Never fails: errors are part of the returned value.
pub fn parse_front_matter(text: &str) -> FrontMatter {
    let has_content = text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return FrontMatter::Absent;
    }

    match yaml::load(text) {
        Ok(Value::Null) => FrontMatter::Absent,
        Ok(Value::Object(map)) => FrontMatter::Parsed(map),
        Ok(other) => FrontMatter::ParseError(FrontMatterError::NotAMapping {
            found: json_type_name(&other),
        }),
        Err(e) => {
            let location = e
                .location()
                .map(|loc| SourceLocation::new(loc.index(), 1, loc.line(), loc.column()));
            FrontMatter::ParseError(FrontMatterError::Syntax {
                message: e.to_string(),
                location,
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// One front matter node seen during the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatterBlock {
    /// Raw YAML text of the node
    pub text: String,

    /// 1-based line of the node in the original document, when the parser
    /// recorded positions
    pub line: Option<u64>,

    pub outcome: FrontMatter,
}

/// Everything the merge transform needs to know about a tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatterScan {
    /// Front matter nodes in document order
    pub blocks: Vec<FrontMatterBlock>,

    /// Whether an ESM node already mentions the metadata binding
    pub has_explicit_declaration: bool,
}

impl FrontMatterScan {
    /// The front matter that wins: the last block that parsed.
    ///
    /// A later empty block parses too, and clears earlier data.
    pub fn front_matter(&self) -> Option<&FrontMatterMap> {
        self.blocks
            .iter()
            .rev()
            .find_map(|block| match &block.outcome {
                FrontMatter::Parsed(map) => Some(Some(map)),
                FrontMatter::Absent => Some(None),
                FrontMatter::ParseError(_) => None,
            })
            .flatten()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks that failed to parse, in document order.
    pub fn errors(&self) -> impl Iterator<Item = (&FrontMatterBlock, &FrontMatterError)> {
        self.blocks.iter().filter_map(|block| match &block.outcome {
            FrontMatter::ParseError(err) => Some((block, err)),
            _ => None,
        })
    }
}

/// Scan a tree for front matter and an explicit `metadata_name` export.
pub fn scan_tree(tree: &Node, metadata_name: &str) -> FrontMatterScan {
    tree.descendants()
        .fold(FrontMatterScan::default(), |mut scan, node| {
            match node.kind {
                NodeKind::Yaml => {
                    let text = node.value().unwrap_or_default();
                    scan.blocks.push(FrontMatterBlock {
                        text: text.to_string(),
                        line: start_line(node),
                        outcome: parse_front_matter(text),
                    });
                }
                NodeKind::MdxjsEsm => {
                    if node.value().is_some_and(|v| v.contains(metadata_name)) {
                        scan.has_explicit_declaration = true;
                    }
                }
                _ => {}
            }
            scan
        })
}

fn start_line(node: &Node) -> Option<u64> {
    node.fields
        .get("position")?
        .get("start")?
        .get("line")?
        .as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mapping_keeps_key_order() {
        let FrontMatter::Parsed(map) = parse_front_matter("title: \"Hello\"\ndraft: true\ntags: [a, b]\n")
        else {
            panic!("Expected parsed front matter");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "draft", "tags"]);
        assert_eq!(map["title"], json!("Hello"));
        assert_eq!(map["draft"], json!(true));
        assert_eq!(map["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_parse_scalar_types() {
        let FrontMatter::Parsed(map) = parse_front_matter("count: 3\nratio: 0.5\nnothing: ~\n")
        else {
            panic!("Expected parsed front matter");
        };
        assert_eq!(map["count"], json!(3));
        assert_eq!(map["ratio"], json!(0.5));
        assert_eq!(map["nothing"], Value::Null);
    }

    #[test]
    fn test_parse_empty_is_absent() {
        assert_eq!(parse_front_matter(""), FrontMatter::Absent);
        assert_eq!(parse_front_matter("  \n\n"), FrontMatter::Absent);
        assert_eq!(parse_front_matter("# just a comment\n"), FrontMatter::Absent);
        assert_eq!(parse_front_matter("~"), FrontMatter::Absent);
    }

    #[test]
    fn test_parse_syntax_error_has_location() {
        let FrontMatter::ParseError(FrontMatterError::Syntax { message, location }) =
            parse_front_matter("title: [unclosed\n")
        else {
            panic!("Expected syntax error");
        };
        assert!(!message.is_empty());
        assert!(location.is_some());
    }

    #[test]
    fn test_parse_non_mapping() {
        assert_eq!(
            parse_front_matter("- a\n- b\n"),
            FrontMatter::ParseError(FrontMatterError::NotAMapping { found: "a list" })
        );
        assert_eq!(
            parse_front_matter("just text"),
            FrontMatter::ParseError(FrontMatterError::NotAMapping { found: "a string" })
        );
    }

    #[test]
    fn test_parse_duplicate_key_is_syntax_error() {
        let FrontMatter::ParseError(FrontMatterError::Syntax { message, location }) =
            parse_front_matter("title: A\ntitle: B\n")
        else {
            panic!("Expected syntax error");
        };
        assert!(message.contains("duplicate entry"));
        assert!(location.is_some());
    }

    #[test]
    fn test_parse_resolves_merge_and_dates() {
        let FrontMatter::Parsed(map) = parse_front_matter(
            "defaults: &defaults\n  layout: post\nauthor:\n  <<: *defaults\n  name: Ada\ndate: 2024-01-15\nversion: 2.0\n",
        ) else {
            panic!("Expected parsed front matter");
        };
        assert_eq!(map["author"], json!({"layout": "post", "name": "Ada"}));
        assert_eq!(map["date"], json!("2024-01-15T00:00:00.000Z"));
        assert_eq!(map["version"], json!(2));
    }

    #[test]
    fn test_scan_finds_front_matter_and_declaration() {
        let tree = Node::root(vec![
            Node::yaml("title: Hello"),
            Node::esm("export const metadata = {title: 'Hi'}"),
            Node::parent("paragraph", vec![Node::literal("text", "metadata")]),
        ]);

        let scan = scan_tree(&tree, "metadata");
        assert_eq!(scan.block_count(), 1);
        assert!(scan.has_explicit_declaration);
        assert_eq!(scan.front_matter().unwrap()["title"], json!("Hello"));
    }

    #[test]
    fn test_scan_ignores_text_mentions() {
        let tree = Node::root(vec![
            Node::esm("import {Chart} from './chart'"),
            Node::parent("paragraph", vec![Node::literal("text", "metadata")]),
        ]);

        let scan = scan_tree(&tree, "metadata");
        assert!(!scan.has_explicit_declaration);
        assert!(scan.front_matter().is_none());
    }

    #[test]
    fn test_scan_uses_custom_name() {
        let tree = Node::root(vec![Node::esm("export const metadata = {}")]);
        assert!(!scan_tree(&tree, "frontmatter").has_explicit_declaration);
    }

    #[test]
    fn test_last_parsed_block_wins() {
        let tree = Node::root(vec![
            Node::yaml("title: First"),
            Node::yaml("title: Second"),
            Node::yaml("title: [broken"),
        ]);

        let scan = scan_tree(&tree, "metadata");
        assert_eq!(scan.block_count(), 3);
        assert_eq!(scan.front_matter().unwrap()["title"], json!("Second"));
        assert_eq!(scan.errors().count(), 1);
    }

    #[test]
    fn test_later_empty_block_clears() {
        let tree = Node::root(vec![Node::yaml("title: First"), Node::yaml("")]);
        assert!(scan_tree(&tree, "metadata").front_matter().is_none());
    }

    #[test]
    fn test_block_line_from_position() {
        let tree = Node::root(vec![Node::yaml("title: x").with_field(
            "position",
            json!({"start": {"line": 1, "column": 1, "offset": 0}}),
        )]);
        assert_eq!(scan_tree(&tree, "metadata").blocks[0].line, Some(1));
    }
}
