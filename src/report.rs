// src/report.rs

//! Human-readable plan and summary output.
//!
//! This goes to STDOUT; logs go to STDERR.

use std::fmt::Write as _;
use std::time::Duration;

use crate::dag::{TaskName, TaskRegistry, WaveScheduler};

/// Everything the reporter needs once a run has finished.
#[derive(Debug)]
pub struct RunSummary {
    /// Finished registry; every task carries its final outcome and output.
    pub registry: TaskRegistry,
    /// Task names per dispatched wave, in dispatch order.
    pub waves: Vec<Vec<TaskName>>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.registry
            .iter()
            .filter(|t| t.outcome().is_some_and(|o| o.is_success()))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.registry.len() - self.succeeded()
    }

    /// 1-based wave in which `task` was dispatched.
    pub fn wave_of(&self, task: &str) -> Option<usize> {
        self.waves
            .iter()
            .position(|wave| wave.iter().any(|name| name == task))
            .map(|idx| idx + 1)
    }
}

/// Render the tasks about to run, their dependencies and the wave layout.
pub fn render_plan(scheduler: &WaveScheduler) -> String {
    let mut out = String::new();
    let registry = scheduler.registry();

    let _ = writeln!(out, "About to run ({} tasks):", registry.len());
    for task in registry.iter() {
        let _ = writeln!(out, "  - {} [{}]", task.name, task.kind);
        let _ = writeln!(out, "      arguments: {}", task.arguments);
        if !task.dependencies.is_empty() {
            let deps: Vec<&str> = task.dependencies.iter().map(String::as_str).collect();
            let _ = writeln!(out, "      dependencies: {}", deps.join(", "));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "waves:");
    for (idx, wave) in scheduler.plan().iter().enumerate() {
        let _ = writeln!(out, "  {}: {}", idx + 1, wave.join(", "));
    }

    out
}

/// Render the per-task results and elapsed time.
///
/// With `show_output`, each task's captured output follows its result line.
pub fn render_summary(summary: &RunSummary, show_output: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "***************");
    let _ = writeln!(out, "*** SUMMARY ***");
    let _ = writeln!(out, "***************");
    let _ = writeln!(out);

    for task in summary.registry.iter() {
        let result = task
            .outcome()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "unset".to_string());
        let _ = writeln!(out, "[{}]\t:\t{}", task.name, result);

        if show_output && !task.output().is_empty() {
            for line in task.output().lines() {
                let _ = writeln!(out, "    | {line}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ok, {} failed, {} waves",
        summary.succeeded(),
        summary.failed(),
        summary.waves.len()
    );
    let _ = writeln!(
        out,
        "Program took {:.2} secs to finish",
        summary.elapsed.as_secs_f64()
    );

    out
}
