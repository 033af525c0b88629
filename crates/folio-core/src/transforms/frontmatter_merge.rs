/*
 * frontmatter_merge.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns YAML front matter into a metadata export.
 */

//! Front matter merge transform.
//!
//! The renderer reads page metadata from `export const metadata = {...}`.
//! Authors may instead write YAML front matter, or both. This transform
//! reconciles the two:
//!
//! 1. Scan the tree for front matter and for an ESM node mentioning the
//!    metadata binding
//! 2. If there is front matter and no such ESM node, prepend a synthesized
//!    declaration built from the front matter
//!
//! An explicit export always wins: it is treated as complete and front
//! matter is not merged into it field by field.
//!
//! The transform converges after one run: the synthesized declaration is
//! detected as explicit on the next run.

use folio_error_reporting::{DiagnosticMessageBuilder, SourceLocation};
use folio_mdast::Node;

use crate::Result;
use crate::config::{DuplicatePolicy, TransformConfig};
use crate::context::TransformContext;
use crate::declaration::LiteralDeclaration;
use crate::error::FolioError;
use crate::frontmatter::{FrontMatterBlock, FrontMatterError, scan_tree};
use crate::transform::AstTransform;

/// Transform that synthesizes a metadata export from front matter.
pub struct FrontMatterMergeTransform {
    config: TransformConfig,
}

impl FrontMatterMergeTransform {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }
}

impl Default for FrontMatterMergeTransform {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

impl AstTransform for FrontMatterMergeTransform {
    fn name(&self) -> &str {
        "frontmatter-merge"
    }

    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<()> {
        let scan = scan_tree(tree, &self.config.metadata_name);

        for (block, error) in scan.errors() {
            report_front_matter_error(block, error, ctx);
        }

        let count = scan.block_count();
        if count > 1 {
            match self.config.duplicate_front_matter {
                DuplicatePolicy::Error => {
                    return Err(FolioError::DuplicateFrontMatter { count });
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(document = %ctx.source_name, count, "Multiple front matter blocks");
                    ctx.add_diagnostic(
                        DiagnosticMessageBuilder::warning("Multiple front matter blocks")
                            .with_code("F-1-3")
                            .problem(format!(
                                "Found {count} front matter blocks; the last valid one is used"
                            ))
                            .add_hint("Merge the blocks into the first one?")
                            .build(),
                    );
                }
            }
        }

        let Some(fields) = scan.front_matter() else {
            return Ok(());
        };

        if scan.has_explicit_declaration {
            tracing::debug!(
                document = %ctx.source_name,
                "Explicit `{}` export found; front matter ignored",
                self.config.metadata_name
            );
            return Ok(());
        }

        let declaration = LiteralDeclaration::new(&self.config.metadata_name, fields)
            .indent(self.config.json_indent)
            .build()?;
        tree.prepend_child(declaration);

        Ok(())
    }
}

fn report_front_matter_error(
    block: &FrontMatterBlock,
    error: &FrontMatterError,
    ctx: &mut TransformContext,
) {
    tracing::warn!(document = %ctx.source_name, %error, "Failed to parse front matter");

    let builder = match error {
        FrontMatterError::Syntax { message, location } => {
            let builder = DiagnosticMessageBuilder::error("Front matter parse error")
                .with_code("F-1-1")
                .problem("The front matter block is not valid YAML")
                .add_detail(message.clone());
            match location {
                Some(location) => builder.with_location(*location),
                None => builder,
            }
        }
        FrontMatterError::NotAMapping { found } => {
            DiagnosticMessageBuilder::error("Front matter is not a mapping")
                .with_code("F-1-2")
                .problem(format!("Front matter must be key/value pairs, found {found}"))
                .with_location(SourceLocation::new(0, block.text.len(), 1, 1))
        }
    };

    let builder = match block.line {
        Some(line) => builder.add_info(format!("The front matter block starts on line {line}")),
        None => builder,
    };

    ctx.add_diagnostic_with_source(
        builder
            .add_info("The block was skipped; page metadata will not include it")
            .build(),
        block.text.clone(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_error_reporting::DiagnosticKind;
    use folio_mdast::NodeKind;
    use serde_json::json;

    fn run(tree: &mut Node, config: TransformConfig) -> (Result<()>, TransformContext) {
        let mut ctx = TransformContext::new("post.mdx");
        let result = FrontMatterMergeTransform::new(config).transform(tree, &mut ctx);
        (result, ctx)
    }

    fn paragraph(text: &str) -> Node {
        Node::parent("paragraph", vec![Node::literal("text", text)])
    }

    #[test]
    fn test_synthesizes_declaration_from_front_matter() {
        let mut tree = Node::root(vec![
            Node::yaml("title: \"Hello\"\ndraft: true"),
            paragraph("Body"),
        ]);

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert!(ctx.diagnostics.is_empty());

        let children = tree.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].kind, NodeKind::MdxjsEsm);
        assert_eq!(
            children[0].value(),
            Some("export const metadata = {\n  \"title\": \"Hello\",\n  \"draft\": true\n};")
        );
        // Front matter node itself stays in place
        assert_eq!(children[1].kind, NodeKind::Yaml);
    }

    #[test]
    fn test_explicit_declaration_wins() {
        let original = Node::root(vec![
            Node::yaml("title: \"Hello\""),
            Node::esm("export const metadata = {title: 'Explicit'}"),
            paragraph("Body"),
        ]);
        let mut tree = original.clone();

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert_eq!(tree, original);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_no_front_matter_is_noop() {
        let original = Node::root(vec![paragraph("Body")]);
        let mut tree = original.clone();

        let (result, _) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert_eq!(tree, original);
    }

    #[test]
    fn test_malformed_front_matter_reports_once() {
        let original = Node::root(vec![Node::yaml("title: [unclosed"), paragraph("Body")]);
        let mut tree = original.clone();

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert_eq!(tree, original);
        assert_eq!(ctx.diagnostics.len(), 1);

        let diagnostic = &ctx.diagnostics[0];
        assert_eq!(diagnostic.message.code.as_deref(), Some("F-1-1"));
        assert_eq!(diagnostic.message.kind, DiagnosticKind::Error);
        assert!(diagnostic.message.location.is_some());
        assert_eq!(diagnostic.source.as_deref(), Some("title: [unclosed"));
    }

    #[test]
    fn test_duplicate_keys_are_malformed() {
        let original = Node::root(vec![Node::yaml("title: A\ntitle: B\n"), paragraph("Body")]);
        let mut tree = original.clone();

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert_eq!(tree, original);
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].message.code.as_deref(), Some("F-1-1"));
    }

    #[test]
    fn test_declaration_uses_javascript_values_and_key_order() {
        let mut tree = Node::root(vec![Node::yaml(
            "slug: intro\n2024: yes\ndate: 2024-01-15\nweight: 3.0\n",
        )]);

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert!(ctx.diagnostics.is_empty());
        insta::assert_snapshot!(tree.children()[0].value().unwrap(), @r#"
export const metadata = {
  "2024": "yes",
  "slug": "intro",
  "date": "2024-01-15T00:00:00.000Z",
  "weight": 3
};
"#);
    }

    #[test]
    fn test_non_mapping_front_matter() {
        let original = Node::root(vec![Node::yaml("- a\n- b")]);
        let mut tree = original.clone();

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();
        assert_eq!(tree, original);
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].message.code.as_deref(), Some("F-1-2"));
    }

    #[test]
    fn test_diagnostic_mentions_block_line() {
        let mut tree = Node::root(vec![Node::yaml("title: [").with_field(
            "position",
            json!({"start": {"line": 1, "column": 1, "offset": 0}}),
        )]);

        let (_, ctx) = run(&mut tree, TransformConfig::default());
        let text = ctx.diagnostics[0].message.to_text(None);
        assert!(text.contains("starts on line 1"));
    }

    #[test]
    fn test_idempotent() {
        let mut once = Node::root(vec![Node::yaml("title: Hello"), paragraph("Body")]);
        run(&mut once, TransformConfig::default()).0.unwrap();

        let mut twice = once.clone();
        run(&mut twice, TransformConfig::default()).0.unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_blocks_last_wins_with_warning() {
        let mut tree = Node::root(vec![Node::yaml("title: First"), Node::yaml("title: Second")]);

        let (result, ctx) = run(&mut tree, TransformConfig::default());
        result.unwrap();

        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].message.code.as_deref(), Some("F-1-3"));
        assert_eq!(ctx.diagnostics[0].message.kind, DiagnosticKind::Warning);

        let estree = tree.children()[0].estree().unwrap();
        let value = &estree["body"][0]["declaration"]["declarations"][0]["init"]["properties"][0]
            ["value"]["value"];
        assert_eq!(value, &json!("Second"));
    }

    #[test]
    fn test_duplicate_blocks_strict() {
        let original = Node::root(vec![Node::yaml("title: First"), Node::yaml("title: Second")]);
        let mut tree = original.clone();
        let config = TransformConfig {
            duplicate_front_matter: DuplicatePolicy::Error,
            ..TransformConfig::default()
        };

        let (result, _) = run(&mut tree, config);
        assert!(matches!(
            result,
            Err(FolioError::DuplicateFrontMatter { count: 2 })
        ));
        assert_eq!(tree, original);
    }

    #[test]
    fn test_custom_name_and_indent() {
        let mut tree = Node::root(vec![
            Node::yaml("title: Hello"),
            // Mentions `metadata`, but the configured binding is `frontmatter`
            Node::esm("export const metadata = {}"),
        ]);
        let config = TransformConfig {
            metadata_name: "frontmatter".to_string(),
            json_indent: 0,
            ..TransformConfig::default()
        };

        run(&mut tree, config).0.unwrap();
        assert_eq!(
            tree.children()[0].value(),
            Some(r#"export const frontmatter = {"title":"Hello"};"#)
        );
    }

    #[test]
    fn test_transform_name() {
        assert_eq!(FrontMatterMergeTransform::default().name(), "frontmatter-merge");
    }
}
