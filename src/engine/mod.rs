// src/engine/mod.rs

//! Orchestration engine.
//!
//! The pure wave state machine lives in [`crate::dag::scheduler`]; this
//! module is the async shell around it:
//! - [`dispatch`] runs or skips a single started task.
//! - [`runtime`] spawns every dispatch of a wave and joins them before
//!   computing the next one.

pub mod dispatch;
pub mod runtime;

pub use dispatch::dispatch;
pub use runtime::Runtime;
