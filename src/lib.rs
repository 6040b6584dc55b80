//! # Taskly Core
//!
//! Board state and task view logic for the Taskly kanban board.
//!
//! A [`BoardStore`] owns one board of ordered columns and tasks and applies
//! validated mutations to it. The [`domain::view`] helpers derive the filtered
//! and sorted task list a column displays, and [`BoardPersistence`] snapshots
//! the board into a local key-value [`Storage`].

pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    board::{Board, Column, ColumnColor, ColumnId, ColumnUpdate},
    sorting::SortOption,
    task::{ColorTag, NewTask, Task, TaskId, TaskPriority, TaskUpdate},
    view::{FilterOption, ViewState},
};
pub use error::{Result, TasklyError};
pub use storage::{BoardPersistence, FileStorage, MemoryStorage, Storage};
pub use store::{BoardAction, BoardStore, DragResult, MissingColumnPolicy, StoreConfig};
