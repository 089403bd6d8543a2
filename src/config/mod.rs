// src/config/mod.rs

//! Task file loading and validation.
//!
//! - [`model`] is the serde data model of the task file.
//! - [`loader`] reads JSON or TOML from disk.
//! - [`validate`] performs structural checks before the graph is built.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{RawTaskFile, TaskFile, TaskSpec};
pub use validate::validate_raw_task_file;
