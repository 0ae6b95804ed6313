//! Domain models for taskapi
//!
//! Task records, their create/patch inputs, and derived statistics.

pub mod statistics;
pub mod task;

pub use statistics::TaskStatistics;
pub use task::{
    now, NewTask, TaskChanges, TaskPriority, TaskRecord, TaskStatus, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
