/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Ordered transforms over a document tree.
 */

//! Ordered transforms over a document tree.
//!
//! A [`TransformPipeline`] owns a list of [`AstTransform`]s and runs them one
//! after another on the same `root` node. A transform edits the tree in
//! place; problems it can recover from go on the [`TransformContext`] as
//! diagnostics, and anything else is returned as an error, which ends the
//! run with the tree in whatever state the failing transform left it.

use folio_mdast::Node;

use crate::Result;
use crate::context::TransformContext;

/// One step applied to a document tree.
///
/// Pipelines are shared between documents, so transforms are `Send + Sync`
/// and keep per-document state on the context rather than on `self`.
pub trait AstTransform: Send + Sync {
    /// Kebab-case name used in logs.
    fn name(&self) -> &str;

    /// Edit `tree` in place.
    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<()>;
}

/// Transforms applied in the order they were added.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn AstTransform>>) {
        self.transforms.extend(transforms);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run every transform on `tree`, stopping at the first error.
    pub fn execute(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(
                transform = transform.name(),
                document = %ctx.source_name,
                "Running transform"
            );
            transform.transform(tree, ctx)?;
        }

        Ok(())
    }

    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use folio_mdast::NodeKind;

    /// Appends a `text` node carrying its label to the root.
    struct AppendText(&'static str);

    impl AstTransform for AppendText {
        fn name(&self) -> &str {
            self.0
        }

        fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<()> {
            tree.children_mut().push(Node::literal("text", self.0));
            Ok(())
        }
    }

    /// Puts an ESM node at the front of the root.
    struct PrependImport;

    impl AstTransform for PrependImport {
        fn name(&self) -> &str {
            "prepend-import"
        }

        fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<()> {
            tree.prepend_child(Node::esm("import {Chart} from './chart'"));
            Ok(())
        }
    }

    /// Refuses trees that already hold an ESM node.
    struct RejectEsm;

    impl AstTransform for RejectEsm {
        fn name(&self) -> &str {
            "reject-esm"
        }

        fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<()> {
            if tree.descendants_of_kind(&NodeKind::MdxjsEsm).next().is_some() {
                return Err(FolioError::other("tree already has ESM"));
            }
            Ok(())
        }
    }

    fn labels(tree: &Node) -> Vec<&str> {
        tree.children()
            .iter()
            .map(|child| child.value().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_empty_pipeline_leaves_tree_alone() {
        let pipeline = TransformPipeline::default();
        assert!(pipeline.is_empty());

        let original = Node::root(vec![Node::yaml("title: Hello")]);
        let mut tree = original.clone();
        let mut ctx = TransformContext::new("post.mdx");
        pipeline.execute(&mut tree, &mut ctx).unwrap();
        assert_eq!(tree, original);
    }

    #[test]
    fn test_transforms_see_earlier_edits() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Box::new(AppendText("a")));
        pipeline.extend([
            Box::new(PrependImport) as Box<dyn AstTransform>,
            Box::new(AppendText("b")),
        ]);
        assert_eq!(pipeline.len(), 3);

        let mut tree = Node::root(vec![Node::literal("text", "body")]);
        let mut ctx = TransformContext::new("post.mdx");
        pipeline.execute(&mut tree, &mut ctx).unwrap();

        assert_eq!(
            labels(&tree),
            vec!["import {Chart} from './chart'", "body", "a", "b"]
        );
        assert_eq!(tree.children()[0].kind, NodeKind::MdxjsEsm);
    }

    #[test]
    fn test_error_keeps_edits_made_so_far() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Box::new(AppendText("before")));
        pipeline.push(Box::new(PrependImport));
        pipeline.push(Box::new(RejectEsm));
        pipeline.push(Box::new(AppendText("after")));

        let mut tree = Node::root(vec![]);
        let mut ctx = TransformContext::new("post.mdx");
        let err = pipeline.execute(&mut tree, &mut ctx).unwrap_err();

        assert!(err.to_string().contains("tree already has ESM"));
        assert_eq!(
            labels(&tree),
            vec!["import {Chart} from './chart'", "before"]
        );
    }

    #[test]
    fn test_transform_names() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Box::new(PrependImport));
        pipeline.push(Box::new(AppendText("footer")));

        assert_eq!(pipeline.transform_names(), vec!["prepend-import", "footer"]);
    }
}
