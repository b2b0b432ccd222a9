//! Locating and reading declaration model files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Model;

/// File extensions recognized as declaration models.
const MODEL_EXTENSIONS: &[&str] = &["json"];

/// Expand files, directories and glob patterns into a list of model files.
///
/// Directories are scanned (non-recursively) for `.json` files. The result is
/// sorted and de-duplicated so that output does not depend on argument order.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            for entry in entries.flatten() {
                let p = entry.path();
                let is_model = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| MODEL_EXTENSIONS.contains(&ext));
                if p.is_file() && is_model {
                    files.push(p);
                }
            }
            continue;
        }

        let matches: Vec<_> = glob::glob(pattern)
            .map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(%pattern, "no files matched");
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Read and parse one declaration model.
pub fn load_model(path: &Path) -> Result<Model> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model: Model = serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), types = model.types.len(), "loaded model");
    Ok(model)
}

pub fn load_models(paths: &[PathBuf]) -> Result<Vec<Model>> {
    paths.iter().map(|p| load_model(p)).collect()
}
