/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Default transform pipeline for folio.
 */

//! Default transform pipeline.
//!
//! Both `folio merge-frontmatter` and `folio check` run the same pipeline, so
//! a document that checks clean transforms clean.

use folio_mdast::Node;

use crate::Result;
use crate::config::TransformConfig;
use crate::context::TransformContext;
use crate::document::{parse_tree, to_json_string};
use crate::transform::TransformPipeline;
use crate::transforms::FrontMatterMergeTransform;

/// Build the pipeline of transforms applied to every document.
pub fn build_default_pipeline(config: &TransformConfig) -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();
    pipeline.push(Box::new(FrontMatterMergeTransform::new(config.clone())));
    pipeline
}

/// Result of processing one serialized document.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub tree: Node,
    pub context: TransformContext,
}

impl ProcessedDocument {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        to_json_string(&self.tree, pretty)
    }
}

/// Parse a JSON tree, run `pipeline` over it, and hand back the result.
pub fn process_document(
    json: &str,
    source_name: &str,
    pipeline: &TransformPipeline,
) -> Result<ProcessedDocument> {
    let mut tree = parse_tree(json)?;
    let mut context = TransformContext::new(source_name);
    pipeline.execute(&mut tree, &mut context)?;
    Ok(ProcessedDocument { tree, context })
}
