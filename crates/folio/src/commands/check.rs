/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Runs the same pipeline as `folio merge-frontmatter` without writing
//! anything, and fails if any document produced an error.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use folio_core::{TransformPipeline, build_default_pipeline, process_document};

use super::{DiagnosticsFormat, report_diagnostics, report_error};
use crate::inputs::{self, Input};

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub input: String,
    pub config: Option<PathBuf>,
    pub diagnostics: DiagnosticsFormat,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let input = Input::resolve(&args.input)?;
    let config = inputs::load_config(args.config.as_deref(), &input)?;
    let pipeline = build_default_pipeline(&config);

    let documents: Vec<(String, String)> = match &input {
        Input::Stdin => vec![("<stdin>".to_string(), inputs::read_stdin()?)],
        Input::File(path) => vec![(
            path.to_string_lossy().into_owned(),
            inputs::read_document(path)?,
        )],
        Input::Directory(dir) => inputs::collect_documents(dir)?
            .into_iter()
            .map(|path| {
                let json = inputs::read_document(&path)?;
                Ok((path.to_string_lossy().into_owned(), json))
            })
            .collect::<Result<_>>()?,
    };

    let with_errors = documents
        .iter()
        .filter(|(name, json)| !check_one(json, name, &pipeline, args.diagnostics))
        .count();

    if with_errors > 0 {
        anyhow::bail!(
            "{} of {} documents have errors",
            with_errors,
            documents.len()
        );
    }

    info!("Checked {} documents", documents.len());
    Ok(())
}

/// Returns whether the document is free of errors.
fn check_one(
    json: &str,
    name: &str,
    pipeline: &TransformPipeline,
    format: DiagnosticsFormat,
) -> bool {
    match process_document(json, name, pipeline) {
        Ok(doc) => {
            report_diagnostics(&doc.context, format);
            !doc.context.has_errors()
        }
        Err(e) => {
            report_error(name, &e, format);
            false
        }
    }
}
