// src/dag/mod.rs

//! Task graph representation and wave scheduling.
//!
//! - [`task`] defines a task and its per-run state.
//! - [`registry`] holds all tasks of a run in input order.
//! - [`waitset`] tracks each task's outstanding dependencies.
//! - [`builder`] builds both from the task list, restricts a run to an
//!   explicit selection, and checks the graph can be scheduled.
//! - [`scheduler`] is the pure state machine that computes waves.

pub mod builder;
pub mod registry;
pub mod scheduler;
pub mod task;
pub mod waitset;

pub use builder::{build, ensure_schedulable, filter_to_explicit, transitive_closure};
pub use registry::TaskRegistry;
pub use scheduler::{ScheduledTask, Wave, WaveScheduler};
pub use task::{Task, TaskKind, TaskName, TaskOutcome, TaskStatus};
pub use waitset::WaitSets;
