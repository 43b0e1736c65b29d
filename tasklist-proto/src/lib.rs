//! Shared wire definitions for the Tasklist todo REST contract.

pub mod payload;
pub mod task;

pub use payload::Payload;
pub use task::{Task, TaskId, TodoBody};
