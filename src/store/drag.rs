use crate::{
    domain::board::ColumnId,
    error::Result,
    store::{BoardAction, BoardStore},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What was dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Column,
    Task,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DropReason {
    #[default]
    Drop,
    Cancel,
}

/// A position inside a droppable container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    #[serde(rename = "droppableId", alias = "containerId")]
    pub container_id: String,
    pub index: usize,
}

/// Completion event of a drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub draggable_id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
    #[serde(default)]
    pub reason: DropReason,
}

impl DragResult {
    /// Translates the drag into a store action, or `None` when it changes nothing
    /// (cancelled, dropped outside any container, or dropped where it started).
    pub fn to_action(&self) -> Option<BoardAction> {
        if self.reason == DropReason::Cancel {
            return None;
        }
        let destination = self.destination.as_ref()?;
        if destination.container_id == self.source.container_id
            && destination.index == self.source.index
        {
            return None;
        }

        let action = match self.kind {
            DragKind::Column => BoardAction::ReorderColumns {
                source_index: self.source.index,
                destination_index: destination.index,
            },
            DragKind::Task if destination.container_id == self.source.container_id => {
                BoardAction::ReorderTask {
                    column_id: ColumnId::from(self.source.container_id.as_str()),
                    source_index: self.source.index,
                    destination_index: destination.index,
                }
            }
            DragKind::Task => BoardAction::MoveTask {
                task_id: self.draggable_id.as_str().into(),
                source_column_id: self.source.container_id.as_str().into(),
                destination_column_id: destination.container_id.as_str().into(),
                source_index: self.source.index,
                destination_index: destination.index,
            },
        };
        Some(action)
    }
}

impl BoardStore {
    /// Resolves a finished drag gesture against the board
    pub fn apply_drag(&mut self, result: &DragResult) -> Result<()> {
        match result.to_action() {
            Some(action) => self.dispatch(action),
            None => {
                debug!(draggable_id = %result.draggable_id, "drag ignored");
                Ok(())
            }
        }
    }
}
