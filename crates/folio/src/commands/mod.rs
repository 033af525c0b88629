//! Command implementations for folio CLI
//!
//! Each command module handles the CLI interface and delegates to
//! folio-core for actual implementation.

use clap::ValueEnum;
use folio_core::{FolioError, TransformContext};

pub mod check;
pub mod merge;

/// Output format for diagnostics on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticsFormat {
    /// Human-readable, with source snippets
    Text,
    /// One JSON object per document
    Json,
}

/// Print the diagnostics collected for one document.
pub fn report_diagnostics(ctx: &TransformContext, format: DiagnosticsFormat) {
    if ctx.diagnostics.is_empty() {
        return;
    }

    match format {
        DiagnosticsFormat::Text => eprintln!("{}", ctx.render_text()),
        DiagnosticsFormat::Json => eprintln!(
            "{}",
            serde_json::json!({
                "document": ctx.source_name,
                "diagnostics": ctx.render_json(),
            })
        ),
    }
}

/// Print a hard error for one document in the same shape as diagnostics.
pub fn report_error(source_name: &str, error: &FolioError, format: DiagnosticsFormat) {
    let mut ctx = TransformContext::new(source_name);
    ctx.add_diagnostic(error.to_diagnostic());
    report_diagnostics(&ctx, format);
}
