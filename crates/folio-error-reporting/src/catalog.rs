//! Error code catalog and lookup.
//!
//! Maps error codes (like "F-1-1") to their metadata: subsystem, title,
//! default message and documentation URL.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "frontmatter", "tree")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// Default message
    pub message_template: String,

    /// URL to documentation (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, embedded at compile time from `error_catalog.json`.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid. This can only happen if someone
/// edits the catalog by hand and breaks it; the catalog tests catch that.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in folio")
});

/// Look up error code information.
///
/// Returns `None` if the error code is not found in the catalog.
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get documentation URL for an error code.
///
/// # Example
///
/// ```
/// use folio_error_reporting::catalog::get_docs_url;
///
/// let url = get_docs_url("F-1-1").unwrap();
/// assert!(url.ends_with("F-1-1"));
/// ```
pub fn get_docs_url(code: &str) -> Option<&str> {
    get_error_info(code).and_then(|info| info.docs_url.as_deref())
}
