// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawTaskFile, TaskFile};
use crate::errors::Result;

/// Load a task file and return the raw, unvalidated model.
///
/// Files ending in `.toml` are parsed as TOML; everything else as JSON.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawTaskFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let raw: RawTaskFile = if is_toml {
        toml::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };

    debug!(path = %path.display(), tasks = raw.tasks.len(), "task file parsed");
    Ok(raw)
}

/// Load a task file and run structural validation.
///
/// Graph checks (duplicate names, dependency resolution, cycles) are left to
/// [`crate::dag::builder`], which owns the graph.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TaskFile> {
    let raw = load_from_path(path)?;
    TaskFile::try_from(raw)
}
