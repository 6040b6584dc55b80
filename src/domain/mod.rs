pub mod board;
pub mod sorting;
pub mod task;
pub mod view;

pub use board::{Board, Column, ColumnColor, ColumnId, ColumnUpdate};
pub use sorting::{sort_tasks, SortOption};
pub use task::{ColorTag, NewTask, Task, TaskId, TaskPriority, TaskUpdate};
pub use view::{filter_tasks, get_tasks_by_column_id, FilterOption, ViewState};
