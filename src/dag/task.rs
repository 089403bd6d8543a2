// src/dag/task.rs

//! Task definition and per-run state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// How a task's `arguments` are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Run `arguments` as a shell command line in a fresh process.
    Exec,
    /// Evaluate `arguments` as a template fragment inside this process.
    Eval,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exec" | "external-process" => Ok(TaskKind::Exec),
            "eval" | "in-process-eval" => Ok(TaskKind::Eval),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Exec => f.write_str("exec"),
            TaskKind::Eval => f.write_str("eval"),
        }
    }
}

/// Lifecycle of a task within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Waiting for dependencies (or for the next wave).
    Pending,
    /// Handed to a dispatch in the current wave.
    Started,
    /// Dispatch completed; `outcome` is set.
    Finished,
}

/// Final classification of a finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// The body failed, or a direct dependency had failed and the body was
    /// never run.
    Failed,
}

impl TaskOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Success => f.write_str("ok"),
            TaskOutcome::Failed => f.write_str("failed"),
        }
    }
}

/// One unit of work: static definition plus mutable run-state.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: TaskName,
    pub kind: TaskKind,
    pub arguments: String,
    /// Direct dependencies.
    pub dependencies: BTreeSet<TaskName>,

    status: TaskStatus,
    outcome: Option<TaskOutcome>,
    output: String,
}

impl Task {
    pub fn new(
        name: impl Into<TaskName>,
        kind: TaskKind,
        arguments: impl Into<String>,
        dependencies: BTreeSet<TaskName>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            arguments: arguments.into(),
            dependencies,
            status: TaskStatus::Pending,
            outcome: None,
            output: String::new(),
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// `None` until the task is finished.
    pub fn outcome(&self) -> Option<TaskOutcome> {
        self.outcome
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_finished(&self) -> bool {
        self.status == TaskStatus::Finished
    }

    pub(crate) fn mark_started(&mut self) {
        self.status = TaskStatus::Started;
    }

    /// Record the final outcome. The outcome is set exactly once; a second
    /// call is ignored.
    pub fn finish(&mut self, outcome: TaskOutcome, output: String) {
        if self.is_finished() {
            warn!(task = %self.name, "task already finished; ignoring second outcome");
            return;
        }
        self.status = TaskStatus::Finished;
        self.outcome = Some(outcome);
        self.output = output;
    }
}
