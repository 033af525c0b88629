/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Per-document state passed through the transform pipeline.
 */

//! Per-document transform context.
//!
//! Transforms never print. Non-fatal problems are pushed onto the context as
//! [`DiagnosticMessage`]s, and the caller decides whether to show them,
//! serialize them, or fail the build.

use folio_error_reporting::{DiagnosticMessage, SourceText};

/// A diagnostic together with the text its location points into.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedDiagnostic {
    pub message: DiagnosticMessage,

    /// Text the message's location refers to (e.g. the front matter YAML)
    pub source: Option<String>,
}

impl CollectedDiagnostic {
    /// Render as text, with a source snippet when possible.
    pub fn to_text(&self, source_name: &str) -> String {
        let source = self
            .source
            .as_deref()
            .map(|content| SourceText::new(source_name, content));
        self.message.to_text(source)
    }
}

/// State for transforming a single document.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    /// Human-readable name of the document (usually its path)
    pub source_name: String,

    /// Non-fatal diagnostics collected during transforms
    pub diagnostics: Vec<CollectedDiagnostic>,
}

impl TransformContext {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic that has no source text attached.
    pub fn add_diagnostic(&mut self, message: DiagnosticMessage) {
        self.diagnostics.push(CollectedDiagnostic {
            message,
            source: None,
        });
    }

    /// Add a diagnostic whose location points into `source`.
    pub fn add_diagnostic_with_source(
        &mut self,
        message: DiagnosticMessage,
        source: impl Into<String>,
    ) {
        self.diagnostics.push(CollectedDiagnostic {
            message,
            source: Some(source.into()),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.message.is_error())
    }

    /// Iterate over the collected messages without their sources.
    pub fn messages(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.diagnostics.iter().map(|d| &d.message)
    }

    /// Render every diagnostic as text, separated by blank lines.
    pub fn render_text(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_text(&self.source_name))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render every diagnostic as a JSON array.
    pub fn render_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.messages().map(DiagnosticMessage::to_json).collect())
    }
}
