/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document tree type definitions for folio.
 *
 * This crate provides pure data types for the mdast/unist tree produced by
 * the MDX parser, plus the ESTree subset folio synthesizes. It depends only
 * on serde and serde_json and can be used by any crate that reads or writes
 * serialized document trees.
 */

pub mod estree;
pub mod node;
pub mod traverse;

pub use estree::{
    Expression, Identifier, Literal, ModuleItem, ObjectExpression, Program, Property, PropertyKey,
    is_identifier_name,
};
pub use node::{Node, NodeData, NodeKind};
pub use traverse::Descendants;
