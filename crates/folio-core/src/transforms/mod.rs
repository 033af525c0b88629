/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document tree transforms.
 */

//! Document tree transforms.
//!
//! - [`FrontMatterMergeTransform`] - Turns YAML front matter into a metadata export
//!
//! These transforms implement [`AstTransform`](crate::transform::AstTransform) and
//! can be added to a [`TransformPipeline`](crate::transform::TransformPipeline).

mod frontmatter_merge;

pub use frontmatter_merge::FrontMatterMergeTransform;
