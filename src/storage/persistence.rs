use crate::{
    domain::{
        board::{Board, Column, ColumnId},
        task::{Task, TaskId},
    },
    error::Result,
    storage::Storage,
    store::{BoardStore, StoreConfig},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A persisted board in which every top-level field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BoardDocument {
    id: Option<String>,
    title: Option<String>,
    columns: Option<HashMap<ColumnId, Column>>,
    tasks: Option<HashMap<TaskId, Task>>,
    column_order: Option<Vec<ColumnId>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl BoardDocument {
    fn into_board(self, fallback: Board) -> Board {
        Board {
            id: self.id.unwrap_or(fallback.id),
            title: self.title.unwrap_or(fallback.title),
            columns: self.columns.unwrap_or(fallback.columns),
            tasks: self.tasks.unwrap_or(fallback.tasks),
            column_order: self.column_order.unwrap_or(fallback.column_order),
            created_at: self.created_at.unwrap_or(fallback.created_at),
            updated_at: self.updated_at.unwrap_or(fallback.updated_at),
        }
    }
}

/// Decodes a persisted board, filling absent top-level fields from the
/// built-in default board
pub fn decode_board(json: &str) -> Result<Board> {
    let document: BoardDocument = serde_json::from_str(json)?;
    Ok(document.into_board(Board::default()))
}

pub fn encode_board(board: &Board) -> Result<String> {
    Ok(serde_json::to_string(board)?)
}

/// Snapshots the board into a key-value store under a fixed key.
///
/// `load` and `save` never fail: problems are logged and the in-memory board
/// stays authoritative. `try_load` and `try_save` surface the errors instead.
pub struct BoardPersistence<S: Storage> {
    storage: S,
    key: String,
    last_saved_revision: Option<u64>,
}

impl<S: Storage> BoardPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            last_saved_revision: None,
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored board; `Ok(None)` when nothing has been saved yet
    pub async fn try_load(&self) -> Result<Option<Board>> {
        match self.storage.get(&self.key).await? {
            Some(json) => decode_board(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the stored board, falling back to the built-in default
    pub async fn load(&self) -> Board {
        match self.try_load().await {
            Ok(Some(board)) => {
                if let Err(e) = board.check_integrity() {
                    warn!(key = %self.key, "stored board failed integrity check: {}", e);
                }
                debug!(key = %self.key, board_id = %board.id, "loaded board");
                board
            }
            Ok(None) => {
                info!(key = %self.key, "no stored board, using default");
                Board::default()
            }
            Err(e) => {
                warn!(key = %self.key, "failed to load board: {}, using default", e);
                Board::default()
            }
        }
    }

    /// Builds a store over the stored (or default) board
    pub async fn load_store(&self, config: StoreConfig) -> BoardStore {
        BoardStore::new(self.load().await, config)
    }

    pub async fn try_save(&self, board: &Board) -> Result<()> {
        let json = encode_board(board)?;
        self.storage.set(&self.key, &json).await
    }

    /// Writes a snapshot; failures are logged and swallowed
    pub async fn save(&self, board: &Board) -> bool {
        match self.try_save(board).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, "failed to save board: {}", e);
                false
            }
        }
    }

    /// Saves the store's board if it changed since the last successful sync.
    /// Returns whether a snapshot was written.
    pub async fn sync(&mut self, store: &BoardStore) -> bool {
        if self.last_saved_revision == Some(store.revision()) {
            return false;
        }
        let saved = self.save(store.board()).await;
        if saved {
            self.last_saved_revision = Some(store.revision());
        }
        saved
    }

    /// Deletes the stored snapshot
    pub async fn clear(&mut self) -> Result<()> {
        self.last_saved_revision = None;
        self.storage.remove(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{board::ColumnColor, task::NewTask},
        error::TasklyError,
        storage::{FileStorage, MemoryStorage},
    };
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct BrokenStorage;

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn initialize(&self) -> Result<()> {
            Ok(())
        }

        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TasklyError::StorageError("quota exceeded".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TasklyError::StorageError("quota exceeded".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_decode_fills_missing_fields_from_default() {
        let board = decode_board(r#"{ "title": "Imported" }"#).unwrap();

        assert_eq!(board.title, "Imported");
        assert_eq!(board.id, Board::DEFAULT_ID);
        assert_eq!(board.column_order.len(), 3);
        assert!(board.check_integrity().is_ok());
    }

    #[test]
    fn test_decode_full_document() {
        let json = r#"{
            "id": "b1",
            "title": "Work",
            "columns": {
                "todo": { "id": "todo", "title": "To Do", "taskIds": ["t1"], "color": "blue" }
            },
            "tasks": {
                "t1": {
                    "id": "t1",
                    "title": "Write spec",
                    "description": "",
                    "labels": ["red"],
                    "priority": "urgent",
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "updatedAt": "2024-01-02T00:00:00.000Z"
                }
            },
            "columnOrder": ["todo"],
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z"
        }"#;

        let board = decode_board(json).unwrap();
        assert_eq!(board.id, "b1");
        assert_eq!(board.tasks[&TaskId::from("t1")].title, "Write spec");
        assert!(board.check_integrity().is_ok());
    }

    #[test]
    fn test_decode_keeps_unrecognised_column_colours() {
        let json = r#"{
            "columnOrder": ["todo", "custom"],
            "columns": {
                "todo": { "id": "todo", "title": "To Do", "color": "teal" },
                "custom": { "id": "custom", "title": "Custom", "color": "bg-slate-500" }
            }
        }"#;

        let board = decode_board(json).unwrap();
        assert_eq!(
            board.columns[&ColumnId::from("todo")].color,
            Some(ColumnColor::Other("teal".to_string()))
        );
        assert!(board.check_integrity().is_ok());

        let reencoded: serde_json::Value =
            serde_json::from_str(&encode_board(&board).unwrap()).unwrap();
        assert_eq!(reencoded["columns"]["todo"]["color"], "teal");
        assert_eq!(reencoded["columns"]["custom"]["color"], "bg-slate-500");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            decode_board("{ not json"),
            Err(TasklyError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_without_snapshot_gives_default() {
        let persistence = BoardPersistence::new(MemoryStorage::new(), "kanban-board");

        assert!(persistence.try_load().await.unwrap().is_none());
        let board = persistence.load().await;
        assert_eq!(board.title, Board::DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_save_and_load_with_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let persistence =
            BoardPersistence::from_config(FileStorage::new(temp_dir.path()), &StoreConfig::default());

        let mut store = BoardStore::default();
        store
            .add_task(&ColumnId::from("todo"), NewTask::new("Persist me"))
            .unwrap();
        assert!(persistence.save(store.board()).await);

        let loaded = persistence.load().await;
        assert_eq!(&loaded, store.board());
        assert!(temp_dir.path().join(".taskly/kanban-board.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set("kanban-board", "42").await.unwrap();
        let persistence = BoardPersistence::new(storage, "kanban-board");

        assert!(persistence.try_load().await.is_err());
        assert_eq!(persistence.load().await.id, Board::DEFAULT_ID);
    }

    #[tokio::test]
    async fn test_storage_failures_are_absorbed() {
        let mut persistence = BoardPersistence::new(BrokenStorage, "kanban-board");
        let mut store = BoardStore::default();
        store.update_board_title("Still here");

        assert_eq!(persistence.load().await.id, Board::DEFAULT_ID);
        assert!(!persistence.save(store.board()).await);
        assert!(!persistence.sync(&store).await);
        assert_eq!(store.board().title, "Still here");
    }

    #[tokio::test]
    async fn test_sync_writes_only_on_new_revisions() {
        let mut persistence = BoardPersistence::new(MemoryStorage::new(), "kanban-board");
        let mut store = persistence.load_store(StoreConfig::default()).await;

        assert!(persistence.sync(&store).await);
        assert!(!persistence.sync(&store).await);

        store.add_column("Review", None);
        assert!(persistence.sync(&store).await);

        let stored = persistence.try_load().await.unwrap().unwrap();
        assert_eq!(stored.column_order.len(), 4);

        persistence.clear().await.unwrap();
        assert!(persistence.try_load().await.unwrap().is_none());
        assert!(persistence.sync(&store).await);
    }
}
