// src/config/validate.rs

use crate::config::model::{RawTaskFile, TaskFile};
use crate::errors::{Result, WavedagError};

impl TryFrom<RawTaskFile> for TaskFile {
    type Error = WavedagError;

    fn try_from(raw: RawTaskFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_task_file(&raw)?;
        Ok(TaskFile::new_unchecked(raw.tasks))
    }
}

/// Structural checks that the typed model alone cannot express.
pub fn validate_raw_task_file(file: &RawTaskFile) -> Result<()> {
    ensure_has_tasks(file)?;
    ensure_names_present(file)?;
    Ok(())
}

fn ensure_has_tasks(file: &RawTaskFile) -> Result<()> {
    if file.tasks.is_empty() {
        return Err(WavedagError::ConfigError(
            "task file must contain at least one entry in `tasks`".to_string(),
        ));
    }
    Ok(())
}

fn ensure_names_present(file: &RawTaskFile) -> Result<()> {
    for (idx, task) in file.tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            return Err(WavedagError::ConfigError(format!(
                "task #{idx} has an empty `name`"
            )));
        }
        if task.declared_dependencies().iter().any(|d| d.trim().is_empty()) {
            return Err(WavedagError::ConfigError(format!(
                "task '{}' lists an empty dependency name",
                task.name
            )));
        }
    }
    Ok(())
}
