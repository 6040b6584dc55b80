use crate::{
    domain::{
        board::{Board, ColumnId, ColumnUpdate},
        sorting::SortOption,
        task::{ColorTag, NewTask, TaskId, TaskUpdate},
        view::FilterOption,
    },
    error::{Result, TasklyError},
};

/// A single mutation request from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    AddTask {
        column_id: ColumnId,
        task: NewTask,
    },
    UpdateTask {
        task_id: TaskId,
        update: TaskUpdate,
    },
    DeleteTask {
        task_id: TaskId,
    },
    MoveTask {
        task_id: TaskId,
        source_column_id: ColumnId,
        destination_column_id: ColumnId,
        source_index: usize,
        destination_index: usize,
    },
    ReorderTask {
        column_id: ColumnId,
        source_index: usize,
        destination_index: usize,
    },
    AddColumn {
        title: String,
        color: Option<ColorTag>,
    },
    UpdateColumn {
        column_id: ColumnId,
        update: ColumnUpdate,
    },
    DeleteColumn {
        column_id: ColumnId,
    },
    ReorderColumns {
        source_index: usize,
        destination_index: usize,
    },
    UpdateBoardTitle {
        title: String,
    },
    ResetBoard,
    LoadBoard {
        board: Box<Board>,
    },
    SetSearchQuery {
        query: String,
    },
    SetSortBy {
        sort_by: SortOption,
    },
    SetFilterBy {
        filter_by: FilterOption,
    },
}

impl BoardAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTask { .. } => "add_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::MoveTask { .. } => "move_task",
            Self::ReorderTask { .. } => "reorder_task",
            Self::AddColumn { .. } => "add_column",
            Self::UpdateColumn { .. } => "update_column",
            Self::DeleteColumn { .. } => "delete_column",
            Self::ReorderColumns { .. } => "reorder_columns",
            Self::UpdateBoardTitle { .. } => "update_board_title",
            Self::ResetBoard => "reset_board",
            Self::LoadBoard { .. } => "load_board",
            Self::SetSearchQuery { .. } => "set_search_query",
            Self::SetSortBy { .. } => "set_sort_by",
            Self::SetFilterBy { .. } => "set_filter_by",
        }
    }

    /// Boundary check: titles that are blank once trimmed are refused
    pub fn validate(&self) -> Result<()> {
        let title = match self {
            Self::AddTask { task, .. } => Some(task.title.as_str()),
            Self::UpdateTask { update, .. } => update.title.as_deref(),
            Self::AddColumn { title, .. } => Some(title.as_str()),
            Self::UpdateColumn { update, .. } => update.title.as_deref(),
            Self::UpdateBoardTitle { title } => Some(title.as_str()),
            _ => None,
        };

        match title {
            Some(title) if title.trim().is_empty() => Err(TasklyError::InvalidTitle),
            _ => Ok(()),
        }
    }

    /// Whether the action changes the board itself rather than only the view state
    pub fn mutates_board(&self) -> bool {
        !matches!(
            self,
            Self::SetSearchQuery { .. } | Self::SetSortBy { .. } | Self::SetFilterBy { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_titles_are_rejected() {
        let action = BoardAction::AddTask {
            column_id: "todo".into(),
            task: NewTask::new("   "),
        };
        assert!(matches!(action.validate(), Err(TasklyError::InvalidTitle)));

        let action = BoardAction::UpdateColumn {
            column_id: "todo".into(),
            update: ColumnUpdate::default().title(""),
        };
        assert!(action.validate().is_err());

        let action = BoardAction::UpdateBoardTitle {
            title: "\t".to_string(),
        };
        assert!(action.validate().is_err());
    }

    #[test]
    fn test_updates_without_title_pass() {
        let action = BoardAction::UpdateTask {
            task_id: "t1".into(),
            update: TaskUpdate::default().description(None),
        };
        assert!(action.validate().is_ok());

        let action = BoardAction::AddColumn {
            title: "Review".to_string(),
            color: None,
        };
        assert!(action.validate().is_ok());
    }

    #[test]
    fn test_view_actions_do_not_mutate_board() {
        assert!(!BoardAction::SetSortBy {
            sort_by: SortOption::Priority
        }
        .mutates_board());
        assert!(BoardAction::ResetBoard.mutates_board());
        assert_eq!(BoardAction::ResetBoard.name(), "reset_board");
    }
}
