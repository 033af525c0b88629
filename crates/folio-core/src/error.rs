//! Error types for folio-core

use std::path::PathBuf;

use folio_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document tree: expected a `root` node, found `{0}`")]
    NotRoot(String),

    #[error("Configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Found {count} front matter blocks; only one is allowed")]
    DuplicateFrontMatter { count: usize },

    #[error("{0}")]
    Other(String),
}

impl FolioError {
    /// Create an error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convert into a diagnostic so CLI output looks the same for hard
    /// errors and collected warnings.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            FolioError::Json(_) | FolioError::NotRoot(_) => {
                DiagnosticMessageBuilder::error("Invalid document tree")
                    .with_code("F-2-1")
                    .problem(self.to_string())
                    .add_hint("Is the input the JSON output of the MDX parser?")
                    .build()
            }
            FolioError::DuplicateFrontMatter { count } => {
                DiagnosticMessageBuilder::error("Multiple front matter blocks")
                    .with_code("F-1-3")
                    .problem(format!(
                        "A document may contain at most one front matter block, found {count}"
                    ))
                    .add_hint("Merge the blocks into the first one?")
                    .build()
            }
            _ => DiagnosticMessage::error(self.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_root_message() {
        let err = FolioError::NotRoot("paragraph".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid document tree: expected a `root` node, found `paragraph`"
        );
        assert_eq!(err.to_diagnostic().code.as_deref(), Some("F-2-1"));
    }

    #[test]
    fn test_duplicate_diagnostic() {
        let diag = FolioError::DuplicateFrontMatter { count: 2 }.to_diagnostic();
        assert_eq!(diag.code.as_deref(), Some("F-1-3"));
        assert!(diag.is_error());
        assert!(diag.problem.unwrap().as_str().contains("found 2"));
    }

    #[test]
    fn test_config_message() {
        let err = FolioError::config("/site/_folio.yml", "unknown field `foo`");
        assert_eq!(
            err.to_string(),
            "Configuration error in /site/_folio.yml: unknown field `foo`"
        );
        assert_eq!(err.to_diagnostic().code, None);
    }
}
