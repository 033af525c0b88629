/*
 * inputs.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Input resolution shared by the commands.
 */

//! Input resolution.
//!
//! Commands accept a single tree, a directory of trees, or `-` for stdin.
//! Configuration comes from `--config` or, failing that, the nearest
//! `_folio.yml` above the input.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_core::TransformConfig;
use tracing::debug;
use walkdir::WalkDir;

/// Where documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
    Directory(PathBuf),
}

impl Input {
    pub fn resolve(input: &str) -> Result<Self> {
        if input == "-" {
            return Ok(Input::Stdin);
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            Ok(Input::Directory(path))
        } else if path.is_file() {
            Ok(Input::File(path))
        } else {
            anyhow::bail!("Input path does not exist: {}", path.display())
        }
    }

    /// Path to start the config search from.
    fn search_start(&self) -> Result<PathBuf> {
        match self {
            Input::Stdin => {
                std::env::current_dir().context("Failed to get current directory")
            }
            Input::File(path) | Input::Directory(path) => Ok(path.clone()),
        }
    }
}

/// Load the configuration for `input`.
pub fn load_config(explicit: Option<&Path>, input: &Input) -> Result<TransformConfig> {
    if let Some(path) = explicit {
        return TransformConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()));
    }

    let start = input.search_start()?;
    match TransformConfig::discover(&start)? {
        Some((path, config)) => {
            debug!("Using configuration: {}", path.display());
            Ok(config)
        }
        None => Ok(TransformConfig::default()),
    }
}

/// All `*.json` files under `dir`, in a stable order.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            documents.push(path.to_path_buf());
        }
    }
    Ok(documents)
}

pub fn read_stdin() -> Result<String> {
    std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")
}

pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))
}
