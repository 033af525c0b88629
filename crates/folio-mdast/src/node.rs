/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type discriminator (the unist `type` field).
///
/// Only the kinds the transforms care about get their own variant; every
/// other mdast/MDX type (paragraph, heading, mdxJsxFlowElement, ...) is kept
/// verbatim in [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Root,
    /// YAML front matter (`---` fenced block at the top of the document)
    Yaml,
    /// Top-level `import`/`export` statements of an MDX document
    MdxjsEsm,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Yaml => "yaml",
            NodeKind::MdxjsEsm => "mdxjsEsm",
            NodeKind::Other(s) => s,
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "root" => NodeKind::Root,
            "yaml" => NodeKind::Yaml,
            "mdxjsEsm" => NodeKind::MdxjsEsm,
            _ => NodeKind::Other(s),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        NodeKind::from(s.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `data` side channel of a node.
///
/// MDX stores the compiled JavaScript of ESM nodes under `data.estree`. The
/// program is kept as raw JSON: parsers attach positions and comments we
/// must hand back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estree: Option<Value>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A unist node.
///
/// Mirrors the JSON shape produced by the MDX/remark pipeline: literals carry
/// `value`, parents carry `children`, and everything else (`position`,
/// `depth`, `lang`, `attributes`, ...) lands in `fields` so a tree survives a
/// JSON round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Node {
    /// A parent node with the given children.
    pub fn parent(kind: impl Into<NodeKind>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
            children: Some(children),
            data: None,
            fields: Map::new(),
        }
    }

    /// A literal node carrying a text payload.
    pub fn literal(kind: impl Into<NodeKind>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(value.into()),
            children: None,
            data: None,
            fields: Map::new(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Self::parent(NodeKind::Root, children)
    }

    pub fn yaml(value: impl Into<String>) -> Self {
        Self::literal(NodeKind::Yaml, value)
    }

    pub fn esm(value: impl Into<String>) -> Self {
        Self::literal(NodeKind::MdxjsEsm, value)
    }

    /// Attach a compiled ESTree program to this node.
    pub fn with_estree(mut self, program: Value) -> Self {
        self.data.get_or_insert_with(NodeData::default).estree = Some(program);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn is(&self, kind: &NodeKind) -> bool {
        &self.kind == kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn estree(&self) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.estree.as_ref())
    }

    /// Children of this node; empty for literals.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Mutable children, turning a literal into a parent if needed.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        self.children.get_or_insert_with(Vec::new)
    }

    /// Insert a node as the first child.
    pub fn prepend_child(&mut self, child: Node) {
        self.children_mut().insert(0, child);
    }
}
