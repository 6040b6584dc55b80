use crate::{
    domain::task::{ColorTag, Task, TaskId},
    error::{Result, TasklyError},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};
use uuid::Uuid;

/// Unique identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generates a fresh, universally unique column id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column accent colour: a known tag, or any other stored value kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnColor {
    Tag(ColorTag),
    Other(String),
}

impl ColumnColor {
    /// The known tag, if this colour is one
    pub fn tag(&self) -> Option<ColorTag> {
        match self {
            ColumnColor::Tag(tag) => Some(*tag),
            ColumnColor::Other(_) => None,
        }
    }
}

impl From<ColorTag> for ColumnColor {
    fn from(tag: ColorTag) -> Self {
        ColumnColor::Tag(tag)
    }
}

/// A named, ordered bucket of task ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColumnColor>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<ColumnColor>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Merges a partial update; `id` and `task_ids` are never touched
    pub fn apply(&mut self, update: ColumnUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }

    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// Partial update for a column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnUpdate {
    pub title: Option<String>,
    pub color: Option<Option<ColumnColor>>,
}

impl ColumnUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn color(mut self, color: Option<ColumnColor>) -> Self {
        self.color = Some(color);
        self
    }
}

/// Kanban board state: the root aggregate owning every column and task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    pub columns: HashMap<ColumnId, Column>,
    pub tasks: HashMap<TaskId, Task>,
    pub column_order: Vec<ColumnId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub const DEFAULT_ID: &'static str = "default-board";
    pub const DEFAULT_TITLE: &'static str = "NHL Taskly";

    /// Creates an empty board with no columns
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            columns: HashMap::new(),
            tasks: HashMap::new(),
            column_order: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Appends a column to the mapping and to the end of column order
    pub fn push_column(&mut self, column: Column) {
        self.column_order.push(column.id.clone());
        self.columns.insert(column.id.clone(), column);
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Columns in left-to-right display order
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Finds the column whose sequence holds the task
    pub fn column_containing(&self, task_id: &TaskId) -> Option<&ColumnId> {
        self.column_order
            .iter()
            .find(|id| {
                self.columns
                    .get(*id)
                    .map(|col| col.task_ids.contains(task_id))
                    .unwrap_or(false)
            })
    }

    /// Verifies the mapping/sequence invariants:
    /// column order and column mapping are in bijection, every sequenced task
    /// exists, and every task sits in exactly one column.
    pub fn check_integrity(&self) -> Result<()> {
        let ordered: HashSet<&ColumnId> = self.column_order.iter().collect();
        if ordered.len() != self.column_order.len() {
            return Err(TasklyError::IntegrityViolation(
                "column order contains duplicates".to_string(),
            ));
        }
        if ordered.len() != self.columns.len()
            || !self.columns.keys().all(|id| ordered.contains(id))
        {
            return Err(TasklyError::IntegrityViolation(
                "column order does not match column mapping".to_string(),
            ));
        }

        let mut seen: HashSet<&TaskId> = HashSet::new();
        for (column_id, column) in &self.columns {
            if &column.id != column_id {
                return Err(TasklyError::IntegrityViolation(format!(
                    "column keyed {} carries id {}",
                    column_id, column.id
                )));
            }
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(TasklyError::IntegrityViolation(format!(
                        "column {} references missing task {}",
                        column_id, task_id
                    )));
                }
                if !seen.insert(task_id) {
                    return Err(TasklyError::IntegrityViolation(format!(
                        "task {} appears more than once",
                        task_id
                    )));
                }
            }
        }

        if seen.len() != self.tasks.len() {
            return Err(TasklyError::IntegrityViolation(
                "some tasks are not placed in any column".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Board {
    /// The built-in board: To Do / In Progress / Done
    fn default() -> Self {
        let mut board = Self::new(Self::DEFAULT_ID, Self::DEFAULT_TITLE);
        board.push_column(Column::new("todo".into(), "To Do").with_color(ColorTag::Blue));
        board.push_column(
            Column::new("progress".into(), "In Progress").with_color(ColorTag::Amber),
        );
        board.push_column(Column::new("done".into(), "Done").with_color(ColorTag::Green));
        board
    }
}
