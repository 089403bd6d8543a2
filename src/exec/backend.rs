// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! Dispatches talk to an `ExecutorBackend` rather than to the strategies
//! directly, so tests can swap in a fake that records what ran without
//! spawning processes.

use std::future::Future;
use std::pin::Pin;

use crate::dag::{Task, TaskKind, TaskOutcome};
use crate::exec::eval::EvalRunner;
use crate::exec::process::run_command;

/// Result of running a task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub outcome: TaskOutcome,
    pub output: String,
}

impl Execution {
    pub fn failed() -> Self {
        Self {
            outcome: TaskOutcome::Failed,
            output: String::new(),
        }
    }
}

/// Trait abstracting how a task body is executed.
///
/// Each dispatch holds the backend behind an `Arc`, so implementations must
/// be shareable across tokio tasks.
pub trait ExecutorBackend: Send + Sync + 'static {
    /// Run the body of `task` and classify the result. Must not return
    /// before the body has completed.
    fn execute<'a>(&'a self, task: &'a Task) -> Pin<Box<dyn Future<Output = Execution> + Send + 'a>>;
}

/// Production backend: shell commands for `exec`, templates for `eval`.
#[derive(Debug, Clone)]
pub struct RealExecutorBackend {
    eval: EvalRunner,
}

impl RealExecutorBackend {
    /// `eval_workers` bounds how many evaluations run at once.
    pub fn new(eval_workers: usize) -> Self {
        Self {
            eval: EvalRunner::new(eval_workers),
        }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn execute<'a>(&'a self, task: &'a Task) -> Pin<Box<dyn Future<Output = Execution> + Send + 'a>> {
        Box::pin(async move {
            match task.kind {
                TaskKind::Exec => run_command(&task.name, &task.arguments).await,
                TaskKind::Eval => self.eval.evaluate(&task.name, &task.arguments).await,
            }
        })
    }
}
