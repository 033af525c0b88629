/*
 * traverse.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Read-only tree traversal.
//!
//! Visits nodes in document order (pre-order, depth-first), the same order
//! `unist-util-visit` uses, starting with the node itself.

use crate::node::{Node, NodeKind};

/// Pre-order iterator over a node and all of its descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl Node {
    /// Iterate over this node and every descendant in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Iterate over every node of the given kind, in document order.
    pub fn descendants_of_kind<'a>(
        &'a self,
        kind: &'a NodeKind,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants().filter(move |node| node.is(kind))
    }
}
