// src/exec/mod.rs

//! Task body execution.
//!
//! - [`process`] runs shell commands with `tokio::process::Command`.
//! - [`eval`] renders template fragments in-process on a bounded pool.
//! - [`backend`] provides the `ExecutorBackend` trait and the production
//!   `RealExecutorBackend` that picks a strategy per task kind.

pub mod backend;
pub mod eval;
pub mod process;

pub use backend::{Execution, ExecutorBackend, RealExecutorBackend};
pub use eval::EvalRunner;
pub use process::run_command;
