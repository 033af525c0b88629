//! Core transform infrastructure for folio
//!
//! This crate contains the transform pipeline that powers the folio CLI.
//!
//! # Architecture
//!
//! - [`TransformPipeline`] - Ordered transforms applied to a document tree
//! - [`TransformContext`] - Per-document state; collects diagnostics
//! - [`TransformConfig`] - Settings read from `_folio.yml`
//! - [`FrontMatterMergeTransform`] - Synthesizes `export const metadata`
//!   from YAML front matter
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{TransformConfig, build_default_pipeline, process_document};
//!
//! let config = TransformConfig::default();
//! let pipeline = build_default_pipeline(&config);
//! let doc = process_document(&json, "post.json", &pipeline)?;
//! println!("{}", doc.to_json(false)?);
//! ```

pub mod config;
pub mod context;
pub mod declaration;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod pipeline;
pub mod transform;
pub mod transforms;
pub mod yaml;

// Re-export commonly used types
pub use config::{CONFIG_FILE_NAMES, DuplicatePolicy, TransformConfig};
pub use context::{CollectedDiagnostic, TransformContext};
pub use declaration::{LiteralDeclaration, build_literal_declaration};
pub use document::{parse_tree, to_json_string};
pub use error::{FolioError, Result};
pub use frontmatter::{
    FrontMatter, FrontMatterBlock, FrontMatterError, FrontMatterMap, FrontMatterScan,
    parse_front_matter, scan_tree,
};
pub use pipeline::{ProcessedDocument, build_default_pipeline, process_document};
pub use transform::{AstTransform, TransformPipeline};
pub use transforms::FrontMatterMergeTransform;
