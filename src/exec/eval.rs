// src/exec/eval.rs

//! In-process evaluation strategy.
//!
//! A fragment is a `minijinja` template rendered inside this process with
//! two variables in scope:
//!
//! - `env`: the process environment, e.g. `{{ env.HOME }}`
//! - `task`: the name of the task being evaluated
//!
//! Undefined variables are errors, and `{{ fail("reason") }}` fails the
//! task on purpose. Rendering happens on tokio's blocking pool so a slow
//! fragment never holds up the scheduler or sibling dispatches.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::{context, Environment, Error, ErrorKind, UndefinedBehavior};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::dag::TaskOutcome;
use crate::exec::Execution;

/// Bounded pool for in-process evaluations.
#[derive(Debug, Clone)]
pub struct EvalRunner {
    permits: Arc<Semaphore>,
}

impl EvalRunner {
    /// `workers` is clamped to at least one.
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// Evaluate `fragment` on a worker thread. Any error, including a panic
    /// inside the worker, becomes `Failed` with empty output.
    pub async fn evaluate(&self, task_name: &str, fragment: &str) -> Execution {
        let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
            warn!(task = %task_name, "evaluation pool closed");
            return Execution::failed();
        };

        info!(task = %task_name, "running in-process evaluation");

        let name = task_name.to_string();
        let source = fragment.to_string();
        let joined = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            render_fragment(&name, &source)
        })
        .await;

        match joined {
            Ok(Ok(output)) => {
                debug!(task = %task_name, "evaluation output:\n{}", output);
                Execution {
                    outcome: TaskOutcome::Success,
                    output,
                }
            }
            Ok(Err(err)) => {
                debug!(task = %task_name, error = %err, "evaluation failed");
                Execution::failed()
            }
            Err(err) => {
                warn!(task = %task_name, error = %err, "evaluation worker panicked");
                Execution::failed()
            }
        }
    }
}

/// Render one fragment synchronously.
pub fn render_fragment(task_name: &str, fragment: &str) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_function("fail", fail);

    let vars: BTreeMap<String, String> = std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect();

    env.render_str(fragment, context! { env => vars, task => task_name })
}

fn fail(message: String) -> Result<String, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}
