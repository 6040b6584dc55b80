use crate::{
    domain::task::ColorTag,
    error::{Result, TasklyError},
};
use serde::{Deserialize, Serialize};

/// What to do when a task operation names a column that does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingColumnPolicy {
    /// Fail with `ColumnNotFound` before touching the board
    #[default]
    Reject,
    /// Create an empty column with the requested id and the placeholder title
    CreatePlaceholder,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub missing_column_policy: MissingColumnPolicy,
    pub placeholder_column_title: String,
    pub default_column_color: ColorTag,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            missing_column_policy: MissingColumnPolicy::Reject,
            placeholder_column_title: "New Column".to_string(),
            default_column_color: ColorTag::Blue,
            storage_key: "kanban-board".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parses a JSON config document; absent fields take their defaults
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| TasklyError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_missing_column_policy(mut self, policy: MissingColumnPolicy) -> Self {
        self.missing_column_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(TasklyError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.placeholder_column_title.trim().is_empty() {
            return Err(TasklyError::ConfigError(
                "placeholder_column_title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
