#![allow(dead_code)]

use wavedag::config::{RawTaskFile, TaskFile, TaskSpec};

/// Builder for a task list, to simplify test setup.
pub struct TaskListBuilder {
    tasks: Vec<TaskSpec>,
}

impl TaskListBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    /// Shorthand for an `exec` task with the given dependencies.
    pub fn exec(self, name: &str, cmd: &str, after: &[&str]) -> Self {
        let mut builder = TaskSpecBuilder::exec(name, cmd);
        for dep in after {
            builder = builder.after(dep);
        }
        self.with_task(builder.build())
    }

    /// The raw list, as the graph builder consumes it.
    pub fn build(self) -> Vec<TaskSpec> {
        self.tasks
    }

    /// A structurally validated task file.
    pub fn build_file(self) -> TaskFile {
        TaskFile::try_from(self.build_raw()).expect("Failed to build valid task file from builder")
    }

    pub fn build_raw(self) -> RawTaskFile {
        RawTaskFile { tasks: self.tasks }
    }
}

impl Default for TaskListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `TaskSpec`.
pub struct TaskSpecBuilder {
    task: TaskSpec,
}

impl TaskSpecBuilder {
    pub fn new(name: &str, kind: &str, arguments: &str) -> Self {
        Self {
            task: TaskSpec::new(name, kind, arguments),
        }
    }

    pub fn exec(name: &str, cmd: &str) -> Self {
        Self::new(name, "exec", cmd)
    }

    pub fn eval(name: &str, fragment: &str) -> Self {
        Self::new(name, "eval", fragment)
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task
            .dependencies
            .get_or_insert_with(Vec::new)
            .push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskSpec {
        self.task
    }
}
