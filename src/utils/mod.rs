//! Low-level building blocks: growable buffers, path handling, process execution.

pub mod array;
pub mod buffer;
pub mod exec;
pub mod path;
