/*
 * estree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The subset of ESTree needed to express `export const name = {...}`.
//!
//! These types serialize to the same JSON that acorn produces for such a
//! declaration, so the result can be stored in an ESM node's `data.estree`
//! and consumed by the MDX compiler.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program {
    pub source_type: SourceType,
    pub body: Vec<ModuleItem>,
}

impl Program {
    pub fn module(body: Vec<ModuleItem>) -> Self {
        Self {
            source_type: SourceType::Module,
            body,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: &Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModuleItem {
    ExportNamedDeclaration(ExportNamedDeclaration),
}

impl ModuleItem {
    /// `export const <name> = <init>;`
    pub fn export_const(name: impl Into<String>, init: Expression) -> Self {
        ModuleItem::ExportNamedDeclaration(ExportNamedDeclaration {
            declaration: Some(Declaration::VariableDeclaration(VariableDeclaration {
                kind: VariableKind::Const,
                declarations: vec![VariableDeclarator {
                    id: Pattern::Identifier(Identifier::new(name)),
                    init: Some(init),
                }],
            })),
            specifiers: Vec::new(),
            source: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNamedDeclaration {
    pub declaration: Option<Declaration>,
    /// Always empty for declarations built here; kept as raw JSON.
    pub specifiers: Vec<Value>,
    pub source: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Declaration {
    VariableDeclaration(VariableDeclaration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Const,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Identifier(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A literal. The value is carried as-is, so a nested mapping or list ends
/// up inside a single `Literal` rather than being expanded into expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Literal(Literal),
    ObjectExpression(ObjectExpression),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    Identifier(Identifier),
    Literal(Literal),
}

impl PropertyKey {
    /// Key for an object property named `name`.
    ///
    /// Names that are not valid identifiers (`last-updated`, `2024`) become
    /// string literal keys, as in `{"last-updated": ...}`.
    pub fn named(name: &str) -> Self {
        if is_identifier_name(name) {
            PropertyKey::Identifier(Identifier::new(name))
        } else {
            PropertyKey::Literal(Literal::new(name))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expression,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

impl Property {
    /// A plain `key: value` property.
    pub fn init(key: PropertyKey, value: Expression) -> Self {
        Self {
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: false,
            computed: false,
        }
    }
}

/// Whether `name` can be written as a bare JavaScript identifier.
///
/// Reserved words are accepted: they are valid as property names.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_start = |c: char| c == '$' || c == '_' || c.is_alphabetic();
    is_start(first) && chars.all(|c| is_start(c) || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}')
}
