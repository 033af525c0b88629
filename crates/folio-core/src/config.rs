/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform configuration and `_folio.yml` discovery.
 */

//! Transform configuration.
//!
//! Settings live under the `folio` key of a `_folio.yml` (or `_folio.yaml`)
//! file. The file is found by walking up from the input path, so a site
//! keeps one configuration at its root:
//!
//! ```yaml
//! folio:
//!   metadata-name: metadata
//!   duplicate-front-matter: error
//!   json-indent: 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["_folio.yml", "_folio.yaml"];

/// What to do when a document has more than one front matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the last block that parsed and emit a warning
    #[default]
    LastWins,
    /// Fail the transform
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Name of the exported binding, both detected and synthesized
    pub metadata_name: String,

    pub duplicate_front_matter: DuplicatePolicy,

    /// Indentation of the synthesized object literal; 0 writes it on one line
    pub json_indent: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            metadata_name: "metadata".to_string(),
            duplicate_front_matter: DuplicatePolicy::default(),
            json_indent: 2,
        }
    }
}

/// Largest indent `JSON.stringify` honours.
const MAX_JSON_INDENT: usize = 10;

impl TransformConfig {
    /// Parse configuration from the contents of a `_folio.yml` file.
    ///
    /// A file without a `folio` key yields the defaults. `origin` is only
    /// used in error messages.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        let value: serde_json::Value = if content.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|e| FolioError::config(origin, e.to_string()))?
        };

        let config = match value.get("folio") {
            Some(section) if !section.is_null() => Self::deserialize(section)
                .map_err(|e| FolioError::config(origin, e.to_string()))?,
            _ => Self::default(),
        };

        config.validate(origin)?;
        Ok(config)
    }

    /// Load configuration from an explicit file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, path)
    }

    /// Search for a config file starting at `start` and walking up.
    ///
    /// `start` may be a file (its directory is searched first) or a
    /// directory. Returns the path of the file that was used.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        let mut current = if start.is_file() {
            start.parent().map(Path::to_path_buf)
        } else {
            Some(start.to_path_buf())
        };

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "Using configuration file");
                    let config = Self::from_file(&candidate)?;
                    return Ok(Some((candidate, config)));
                }
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        Ok(None)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        if !folio_mdast::is_identifier_name(&self.metadata_name) {
            return Err(FolioError::config(
                origin,
                format!(
                    "metadata-name `{}` is not a valid JavaScript identifier",
                    self.metadata_name
                ),
            ));
        }
        if self.json_indent > MAX_JSON_INDENT {
            return Err(FolioError::config(
                origin,
                format!(
                    "json-indent must be at most {MAX_JSON_INDENT}, got {}",
                    self.json_indent
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn origin() -> &'static Path {
        Path::new("_folio.yml")
    }

    #[test]
    fn test_defaults() {
        let config = TransformConfig::default();
        assert_eq!(config.metadata_name, "metadata");
        assert_eq!(config.duplicate_front_matter, DuplicatePolicy::LastWins);
        assert_eq!(config.json_indent, 2);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(
            TransformConfig::from_yaml_str("", origin()).unwrap(),
            TransformConfig::default()
        );
        assert_eq!(
            TransformConfig::from_yaml_str("other: 1\n", origin()).unwrap(),
            TransformConfig::default()
        );
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = "folio:\n  metadata-name: frontmatter\n  duplicate-front-matter: error\n  json-indent: 0\n";
        let config = TransformConfig::from_yaml_str(yaml, origin()).unwrap();
        assert_eq!(config.metadata_name, "frontmatter");
        assert_eq!(config.duplicate_front_matter, DuplicatePolicy::Error);
        assert_eq!(config.json_indent, 0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config =
            TransformConfig::from_yaml_str("folio:\n  json-indent: 4\n", origin()).unwrap();
        assert_eq!(config.json_indent, 4);
        assert_eq!(config.metadata_name, "metadata");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = TransformConfig::from_yaml_str("folio:\n  metdata-name: x\n", origin())
            .unwrap_err();
        assert!(matches!(err, FolioError::Config { .. }));
        assert!(err.to_string().contains("metdata-name"));
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let err = TransformConfig::from_yaml_str("folio:\n  metadata-name: page-meta\n", origin())
            .unwrap_err();
        assert!(err.to_string().contains("not a valid JavaScript identifier"));
    }

    #[test]
    fn test_indent_limit() {
        let err =
            TransformConfig::from_yaml_str("folio:\n  json-indent: 11\n", origin()).unwrap_err();
        assert!(err.to_string().contains("at most 10"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = TransformConfig::from_yaml_str("folio: [", origin()).unwrap_err();
        assert!(matches!(err, FolioError::Config { .. }));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("content").join("posts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp.path().join("_folio.yml"),
            "folio:\n  json-indent: 0\n",
        )
        .unwrap();
        let doc = nested.join("hello.json");
        fs::write(&doc, "{}").unwrap();

        let (path, config) = TransformConfig::discover(&doc).unwrap().unwrap();
        assert_eq!(path, temp.path().join("_folio.yml"));
        assert_eq!(config.json_indent, 0);
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("blog");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("_folio.yml"), "folio:\n  json-indent: 0\n").unwrap();
        fs::write(nested.join("_folio.yaml"), "folio:\n  json-indent: 4\n").unwrap();

        let (path, config) = TransformConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(path, nested.join("_folio.yaml"));
        assert_eq!(config.json_indent, 4);
    }
}
