/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Merge-frontmatter command implementation
 */

//! Merge-frontmatter command implementation.
//!
//! Reads serialized document trees, runs the default pipeline over each, and
//! writes the transformed trees:
//!
//! - `-` reads stdin and writes stdout (or `--output FILE`)
//! - a file writes stdout (or `--output FILE`)
//! - a directory rewrites every `*.json` file in place, or mirrors the
//!   tree under `--output DIR`
//!
//! A document that fails hard is reported and left unwritten; the remaining
//! documents are still processed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use folio_core::{TransformPipeline, build_default_pipeline, process_document};

use super::{DiagnosticsFormat, report_diagnostics, report_error};
use crate::inputs::{self, Input};

/// Arguments for the merge-frontmatter command
#[derive(Debug)]
pub struct MergeArgs {
    pub input: String,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub diagnostics: DiagnosticsFormat,
    pub pretty: bool,
}

/// Execute the merge-frontmatter command
pub fn execute(args: MergeArgs) -> Result<()> {
    let input = Input::resolve(&args.input)?;
    let config = inputs::load_config(args.config.as_deref(), &input)?;
    let pipeline = build_default_pipeline(&config);

    match &input {
        Input::Stdin => {
            let json = inputs::read_stdin()?;
            let output = transform_one(&json, "<stdin>", &pipeline, &args)?;
            write_output(args.output.as_deref(), &output)
        }
        Input::File(path) => {
            let json = inputs::read_document(path)?;
            let name = path.to_string_lossy();
            let output = transform_one(&json, &name, &pipeline, &args)?;
            write_output(args.output.as_deref(), &output)
        }
        Input::Directory(dir) => transform_directory(dir, &pipeline, &args),
    }
}

fn transform_one(
    json: &str,
    name: &str,
    pipeline: &TransformPipeline,
    args: &MergeArgs,
) -> Result<String> {
    match process_document(json, name, pipeline) {
        Ok(doc) => {
            report_diagnostics(&doc.context, args.diagnostics);
            Ok(doc.to_json(args.pretty)?)
        }
        Err(e) => {
            report_error(name, &e, args.diagnostics);
            anyhow::bail!("Failed to transform {}", name)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Output: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn transform_directory(dir: &Path, pipeline: &TransformPipeline, args: &MergeArgs) -> Result<()> {
    let documents = inputs::collect_documents(dir)?;
    info!("Transforming {} documents in {}", documents.len(), dir.display());

    let mut failed = 0;
    for path in &documents {
        let json = inputs::read_document(path)?;
        let name = path.to_string_lossy();
        let output = match transform_one(&json, &name, pipeline, args) {
            Ok(output) => output,
            Err(e) => {
                debug!("{:#}", e);
                failed += 1;
                continue;
            }
        };

        let target = match &args.output {
            Some(out_dir) => out_dir.join(path.strip_prefix(dir).unwrap_or(path)),
            None => path.clone(),
        };
        write_output(Some(&target), &output)?;
    }

    if failed > 0 {
        anyhow::bail!("{} of {} documents failed", failed, documents.len());
    }
    Ok(())
}
