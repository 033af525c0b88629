/*
 * declaration.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Builds `export const <name> = {...}` ESM nodes.
 */

//! Literal declaration builder.
//!
//! Turns a mapping into an MDX ESM node declaring `export const <name>` bound
//! to an object literal. The node carries both forms MDX consumes: the
//! JavaScript source in `value` and the compiled program in `data.estree`.
//! Each property value is a single `Literal`; nested mappings and lists are
//! not expanded into expressions.
//!
//! Properties follow the mapping's order. Front matter loaded by
//! [`crate::yaml::load`] is already in JavaScript enumeration order, so the
//! source and the program list keys the way `Object.entries` would.
//!
//! The builder is pure: it reads nothing but its arguments and can be tested
//! without a tree.

use folio_mdast::estree::{
    Expression, Literal, ModuleItem, ObjectExpression, Program, Property, PropertyKey,
};
use folio_mdast::Node;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::frontmatter::FrontMatterMap;

/// Builder for a literal `export const` declaration node.
#[derive(Debug, Clone)]
pub struct LiteralDeclaration<'a> {
    name: &'a str,
    fields: &'a FrontMatterMap,
    indent: usize,
}

impl<'a> LiteralDeclaration<'a> {
    pub fn new(name: &'a str, fields: &'a FrontMatterMap) -> Self {
        Self {
            name,
            fields,
            indent: 2,
        }
    }

    /// Indentation of the object literal in `value`; 0 keeps it on one line.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// The compiled form of the declaration.
    pub fn program(&self) -> Program {
        let properties = self
            .fields
            .iter()
            .map(|(key, value)| {
                Property::init(
                    PropertyKey::named(key),
                    Expression::Literal(Literal::new(value.clone())),
                )
            })
            .collect();

        Program::module(vec![ModuleItem::export_const(
            self.name,
            Expression::ObjectExpression(ObjectExpression { properties }),
        )])
    }

    /// The JavaScript source of the declaration.
    pub fn source(&self) -> serde_json::Result<String> {
        let object = if self.indent == 0 {
            serde_json::to_string(self.fields)?
        } else {
            let indent = " ".repeat(self.indent);
            let mut out = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
            self.fields.serialize(&mut serializer)?;
            String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)?
        };

        Ok(format!("export const {} = {};", self.name, object))
    }

    pub fn build(&self) -> serde_json::Result<Node> {
        Ok(Node::esm(self.source()?).with_estree(self.program().to_json()?))
    }
}

/// Build `export const <name> = {...};` with the default layout.
pub fn build_literal_declaration(name: &str, fields: &FrontMatterMap) -> serde_json::Result<Node> {
    LiteralDeclaration::new(name, fields).build()
}
