//! Error reporting and diagnostic messages for folio.
//!
//! Diagnostics are structured values rather than log lines, so a caller can
//! decide whether to print them, serialize them, or fail the build:
//!
//! - [`DiagnosticMessage`]: the main message structure
//! - [`DiagnosticMessageBuilder`]: tidyverse-style builder
//! - [`catalog`]: error code lookup (`F-<subsystem>-<number>`)
//!
//! Messages render as plain text ([`DiagnosticMessage::to_text`]), with an
//! ariadne source snippet when a [`SourceLocation`] and the source text are
//! available, or as JSON ([`DiagnosticMessage::to_json`]).

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_docs_url, get_error_info};
pub use diagnostic::{
    DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent, SourceLocation,
    SourceText,
};
