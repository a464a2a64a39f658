//! Port traits for everything the engine consumes from the outside world:
//! wall-clock time, the save slot, scene content, and settings.
//!
//! Adapters live in [`crate::infrastructure`]; tests mock these directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use delvr_shared::{GameSettings, GameState, SceneData};

/// Failure talking to a backing store or content source.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Wall-clock access, injectable so tests can pin timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The save slot. `load` returning `Ok(None)` means "no saved game yet";
/// errors are reserved for actual store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveStore: Send + Sync {
    async fn save(&self, state: &GameState) -> Result<(), StoreError>;
    async fn load(&self) -> Result<Option<GameState>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Scene content documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SceneSource: Send + Sync {
    async fn load(&self) -> Result<Vec<SceneData>, StoreError>;
}

/// Settings document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load(&self) -> Result<GameSettings, StoreError>;
}
