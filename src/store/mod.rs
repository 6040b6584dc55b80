//! The board store: single owner of the board, applying one validated
//! mutation at a time.
//!
//! Every operation checks its preconditions first and only then mutates, so an
//! `Err` always leaves the board exactly as it was. Successful board mutations
//! refresh `updated_at` and bump the store's revision counter.

use crate::{
    domain::{
        board::{Board, Column, ColumnId, ColumnUpdate},
        sorting::SortOption,
        task::{ColorTag, NewTask, Task, TaskId, TaskUpdate},
        view::{get_tasks_by_column_id, FilterOption, ViewState},
    },
    error::{Result, TasklyError},
};
use tracing::{debug, warn};

pub mod action;
pub mod config;
pub mod drag;

pub use action::BoardAction;
pub use config::{MissingColumnPolicy, StoreConfig};
pub use drag::{DragKind, DragLocation, DragResult, DropReason};

/// State container for one board plus its view settings
#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    view: ViewState,
    config: StoreConfig,
    revision: u64,
}

impl BoardStore {
    pub fn new(board: Board, config: StoreConfig) -> Self {
        Self {
            board,
            view: ViewState::default(),
            config,
            revision: 0,
        }
    }

    /// Creates a store over the built-in default board
    pub fn with_default_board(config: StoreConfig) -> Self {
        Self::new(Board::default(), config)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Monotonic count of applied board mutations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// The column's tasks as currently displayed: filtered, searched and sorted
    pub fn visible_tasks(&self, column_id: &ColumnId) -> Vec<&Task> {
        match self.board.column(column_id) {
            Some(column) => get_tasks_by_column_id(
                &self.board.tasks,
                &column.task_ids,
                self.view.sort_by,
                self.view.filter_by,
                &self.view.search_query,
            ),
            None => Vec::new(),
        }
    }

    /// Single entry point for the presentation layer.
    ///
    /// Applies boundary validation (blank titles) and routes to the matching
    /// operation.
    pub fn dispatch(&mut self, action: BoardAction) -> Result<()> {
        action.validate()?;
        let name = action.name();
        let mutates = action.mutates_board();

        match action {
            BoardAction::AddTask { column_id, task } => {
                self.add_task(&column_id, task)?;
            }
            BoardAction::UpdateTask { task_id, update } => self.update_task(&task_id, update),
            BoardAction::DeleteTask { task_id } => self.delete_task(&task_id),
            BoardAction::MoveTask {
                task_id,
                source_column_id,
                destination_column_id,
                source_index,
                destination_index,
            } => self.move_task(
                &task_id,
                &source_column_id,
                &destination_column_id,
                source_index,
                destination_index,
            )?,
            BoardAction::ReorderTask {
                column_id,
                source_index,
                destination_index,
            } => self.reorder_task(&column_id, source_index, destination_index)?,
            BoardAction::AddColumn { title, color } => {
                self.add_column(title, color);
            }
            BoardAction::UpdateColumn { column_id, update } => {
                self.update_column(&column_id, update)
            }
            BoardAction::DeleteColumn { column_id } => self.delete_column(&column_id),
            BoardAction::ReorderColumns {
                source_index,
                destination_index,
            } => self.reorder_columns(source_index, destination_index)?,
            BoardAction::UpdateBoardTitle { title } => self.update_board_title(title),
            BoardAction::ResetBoard => self.reset_board(),
            BoardAction::LoadBoard { board } => self.load_board(*board),
            BoardAction::SetSearchQuery { query } => self.set_search_query(query),
            BoardAction::SetSortBy { sort_by } => self.set_sort_by(sort_by),
            BoardAction::SetFilterBy { filter_by } => self.set_filter_by(filter_by),
        }

        if mutates {
            debug!(action = name, revision = self.revision, "dispatched");
        }
        Ok(())
    }

    /// Creates a task and appends it to the end of the column
    pub fn add_task(&mut self, column_id: &ColumnId, draft: NewTask) -> Result<TaskId> {
        self.resolve_column_len(column_id)?;
        self.materialize_column(column_id);

        let task = Task::from_draft(draft);
        let task_id = task.id.clone();
        if let Some(column) = self.board.columns.get_mut(column_id) {
            column.task_ids.push(task_id.clone());
        }
        self.board.tasks.insert(task_id.clone(), task);
        self.commit();

        debug!(task_id = %task_id, column_id = %column_id, "task added");
        Ok(task_id)
    }

    /// Merges fields into an existing task; unknown ids are ignored
    pub fn update_task(&mut self, task_id: &TaskId, update: TaskUpdate) {
        let Some(task) = self.board.tasks.get_mut(task_id) else {
            debug!(task_id = %task_id, "update_task ignored: task not found");
            return;
        };
        task.apply(update);
        self.commit();
    }

    /// Removes a task from its column and from the task map; unknown ids are ignored
    pub fn delete_task(&mut self, task_id: &TaskId) {
        if !self.board.tasks.contains_key(task_id) {
            debug!(task_id = %task_id, "delete_task ignored: task not found");
            return;
        }

        for column in self.board.columns.values_mut() {
            column.task_ids.retain(|id| id != task_id);
        }
        self.board.tasks.remove(task_id);
        self.commit();
    }

    /// Moves a task between columns (cross-column drag).
    ///
    /// The source column must exist under every policy; only a missing
    /// destination may become a placeholder.
    /// `source_index` must point at `task_id` in the source column and
    /// `destination_index` may be at most the destination length (after the
    /// removal when both columns are the same).
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        source_column_id: &ColumnId,
        destination_column_id: &ColumnId,
        source_index: usize,
        destination_index: usize,
    ) -> Result<()> {
        let source_len = self.existing_column_len(source_column_id)?;
        let destination_len = self.resolve_column_len(destination_column_id)?;

        if !self.board.tasks.contains_key(task_id) {
            return Err(TasklyError::TaskNotFound(task_id.to_string()));
        }
        check_index(source_column_id, source_index, source_len)?;

        let position = self
            .board
            .column(source_column_id)
            .and_then(|col| col.position_of(task_id));
        if position != Some(source_index) {
            return Err(TasklyError::TaskIndexMismatch {
                task_id: task_id.to_string(),
                column_id: source_column_id.to_string(),
                index: source_index,
            });
        }

        let insert_limit = if source_column_id == destination_column_id {
            source_len - 1
        } else {
            destination_len
        };
        check_index(destination_column_id, destination_index, insert_limit + 1)?;

        self.materialize_column(destination_column_id);
        if let Some(source) = self.board.columns.get_mut(source_column_id) {
            source.task_ids.remove(source_index);
        }
        if let Some(destination) = self.board.columns.get_mut(destination_column_id) {
            destination
                .task_ids
                .insert(destination_index, task_id.clone());
        }
        self.commit();

        debug!(
            task_id = %task_id,
            from = %source_column_id,
            to = %destination_column_id,
            "task moved"
        );
        Ok(())
    }

    /// Permutes a column's task sequence (same-column drag).
    /// A missing column is `ColumnNotFound` under every policy.
    pub fn reorder_task(
        &mut self,
        column_id: &ColumnId,
        source_index: usize,
        destination_index: usize,
    ) -> Result<()> {
        let len = self.existing_column_len(column_id)?;
        check_index(column_id, source_index, len)?;
        check_index(column_id, destination_index, len)?;

        if let Some(column) = self.board.columns.get_mut(column_id) {
            splice_move(&mut column.task_ids, source_index, destination_index);
        }
        self.commit();
        Ok(())
    }

    /// Appends a new empty column; `None` uses the configured default colour
    pub fn add_column(&mut self, title: impl Into<String>, color: Option<ColorTag>) -> ColumnId {
        let color = color.unwrap_or(self.config.default_column_color);
        let column = Column::new(ColumnId::generate(), title).with_color(color);
        let column_id = column.id.clone();

        self.board.push_column(column);
        self.commit();

        debug!(column_id = %column_id, "column added");
        column_id
    }

    /// Merges title/colour into a column; unknown ids are ignored
    pub fn update_column(&mut self, column_id: &ColumnId, update: ColumnUpdate) {
        let Some(column) = self.board.columns.get_mut(column_id) else {
            debug!(column_id = %column_id, "update_column ignored: column not found");
            return;
        };
        column.apply(update);
        self.commit();
    }

    /// Deletes a column together with every task it holds; unknown ids are ignored
    pub fn delete_column(&mut self, column_id: &ColumnId) {
        let Some(column) = self.board.columns.remove(column_id) else {
            debug!(column_id = %column_id, "delete_column ignored: column not found");
            return;
        };

        for task_id in &column.task_ids {
            self.board.tasks.remove(task_id);
        }
        self.board.column_order.retain(|id| id != column_id);
        self.commit();

        debug!(
            column_id = %column_id,
            removed_tasks = column.task_ids.len(),
            "column deleted"
        );
    }

    /// Permutes the left-to-right column order
    pub fn reorder_columns(&mut self, source_index: usize, destination_index: usize) -> Result<()> {
        let len = self.board.column_order.len();
        check_index("column order", source_index, len)?;
        check_index("column order", destination_index, len)?;

        splice_move(&mut self.board.column_order, source_index, destination_index);
        self.commit();
        Ok(())
    }

    pub fn update_board_title(&mut self, title: impl Into<String>) {
        self.board.title = title.into();
        self.commit();
    }

    /// Restores the built-in board and clears the view settings
    pub fn reset_board(&mut self) {
        self.board = Board::default();
        self.view = ViewState::default();
        self.revision += 1;
    }

    /// Replaces the whole board, keeping the incoming timestamps
    pub fn load_board(&mut self, board: Board) {
        if let Err(e) = board.check_integrity() {
            warn!(board_id = %board.id, "loading board with broken integrity: {}", e);
        }
        self.board = board;
        self.revision += 1;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.search_query = query.into();
    }

    pub fn set_sort_by(&mut self, sort_by: SortOption) {
        self.view.sort_by = sort_by;
    }

    pub fn set_filter_by(&mut self, filter_by: FilterOption) {
        self.view.filter_by = filter_by;
    }

    fn commit(&mut self) {
        self.board.touch();
        self.revision += 1;
    }

    /// Length of a column that must already hold tasks (move source, reorder).
    /// A missing column is `ColumnNotFound` under every policy.
    fn existing_column_len(&self, column_id: &ColumnId) -> Result<usize> {
        self.board
            .column(column_id)
            .map(|column| column.task_ids.len())
            .ok_or_else(|| TasklyError::ColumnNotFound(column_id.to_string()))
    }

    /// Length of a column receiving a task. A missing column is either an
    /// error or, under `CreatePlaceholder`, treated as empty.
    fn resolve_column_len(&self, column_id: &ColumnId) -> Result<usize> {
        match self.board.column(column_id) {
            Some(column) => Ok(column.task_ids.len()),
            None => match self.config.missing_column_policy {
                MissingColumnPolicy::Reject => {
                    Err(TasklyError::ColumnNotFound(column_id.to_string()))
                }
                MissingColumnPolicy::CreatePlaceholder => Ok(0),
            },
        }
    }

    /// Creates the placeholder column when the policy allows and it is missing
    fn materialize_column(&mut self, column_id: &ColumnId) {
        if self.board.columns.contains_key(column_id)
            || self.config.missing_column_policy != MissingColumnPolicy::CreatePlaceholder
        {
            return;
        }

        warn!(column_id = %column_id, "creating placeholder column for unknown id");
        let column = Column::new(column_id.clone(), self.config.placeholder_column_title.clone())
            .with_color(self.config.default_column_color);
        self.board.push_column(column);
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::with_default_board(StoreConfig::default())
    }
}

fn check_index(sequence: impl ToString, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(TasklyError::IndexOutOfRange {
            sequence: sequence.to_string(),
            index,
            len,
        });
    }
    Ok(())
}

/// Removes the element at `from` and reinserts it at `to`
fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}
