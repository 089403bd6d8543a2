// src/config/model.rs

use serde::{Deserialize, Serialize};

/// Task file as read from disk, before validation.
///
/// ```json
/// {
///   "tasks": [
///     { "name": "compile", "type": "exec", "arguments": "make" },
///     { "name": "build", "type": "exec", "arguments": "make pkg",
///       "dependencies": ["compile"] }
///   ]
/// }
/// ```
///
/// The same shape is accepted from TOML as an array of `[[tasks]]` tables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawTaskFile {
    pub tasks: Vec<TaskSpec>,
}

/// One entry of the `tasks` array.
///
/// `kind` is kept as the raw string here; it is turned into a
/// [`TaskKind`](crate::dag::TaskKind) when the registry is built so that an
/// unsupported value aborts the run before anything executes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    pub name: String,

    /// `"exec"` or `"eval"`.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// Shell command line (`exec`) or template fragment (`eval`).
    pub arguments: String,

    /// Names of tasks that must finish first. `None` when the field is
    /// absent from the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            arguments: arguments.into(),
            dependencies: None,
        }
    }

    /// Dependencies as declared, empty if the field was absent.
    pub fn declared_dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or(&[])
    }
}

/// Structurally validated task file.
///
/// Construct it through `TryFrom<RawTaskFile>`; graph-level checks
/// (duplicates, unknown dependencies, cycles) happen later in
/// [`crate::dag::builder`].
#[derive(Debug, Clone)]
pub struct TaskFile {
    tasks: Vec<TaskSpec>,
}

impl TaskFile {
    pub(crate) fn new_unchecked(tasks: Vec<TaskSpec>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<TaskSpec> {
        self.tasks
    }
}
