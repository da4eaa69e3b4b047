//! Taskfile model and loader for taskdot.
//!
//! This crate owns the in-memory representation of a Taskfile (named tasks,
//! their declared dependencies, and their command lists) and the logic for
//! locating and decoding one from disk. Everything downstream (graph
//! construction, styling, rendering) consumes the types defined here and
//! never touches the filesystem itself.
//!
//! # Key Types
//!
//! - [`Taskfile`]: the decoded document, tasks kept in declaration order
//! - [`Task`]: a single task with its `deps` and `cmds` lists
//! - [`Cmd`]: a command entry, either an opaque shell command or a call to
//!   another task

mod error;
mod taskfile;

pub use error::{Error, Result};
pub use taskfile::{Cmd, Dep, Task, Taskfile, Version};
