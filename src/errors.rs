// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is fatal to the whole run. A task whose command exits
//! non-zero is *not* an error here; that is recorded on the task itself.

use thiserror::Error;

use crate::dag::TaskName;

#[derive(Error, Debug)]
pub enum WavedagError {
    #[error("Duplicate task name: {0}")]
    DuplicateTask(TaskName),

    #[error("Unknown task(s): {}", .0.join(", "))]
    UnknownTask(Vec<TaskName>),

    #[error("Unknown dependency '{dependency}'{}", describe_referrer(.task))]
    UnknownDependency {
        task: Option<TaskName>,
        dependency: TaskName,
    },

    #[error("Invalid dependencies: {}", .0.join(", "))]
    InvalidDependencies(Vec<TaskName>),

    #[error("Unsupported execution kind '{kind}' for task '{task}' (expected \"exec\" or \"eval\")")]
    UnsupportedKind { task: TaskName, kind: String },

    #[error("Cycle detected in task graph: {0}")]
    CyclicDependency(String),

    #[error("Scheduler stalled with unfinished tasks: {}", .0.join(", "))]
    SchedulerStalled(Vec<TaskName>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_referrer(task: &Option<TaskName>) -> String {
    match task {
        Some(task) => format!(" referenced by task '{task}'"),
        None => String::new(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WavedagError>;
