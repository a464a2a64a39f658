//! Persistence gateway.
//!
//! Wraps the pluggable [`SaveStore`] port. Write failures surface to the
//! caller; read failures are recovered locally - a failed load behaves like
//! an absent save.

use std::sync::Arc;

use delvr_shared::GameState;

use crate::ports::{SaveStore, StoreError};

/// Serializes and deserializes game snapshots through a backing store.
pub struct GameSaver {
    store: Arc<dyn SaveStore>,
}

impl GameSaver {
    pub fn new(store: Arc<dyn SaveStore>) -> Self {
        Self { store }
    }

    pub async fn save_game(&self, state: GameState) -> Result<(), StoreError> {
        self.store.save(&state).await?;
        tracing::info!(timestamp = %state.timestamp, "Game state saved");
        Ok(())
    }

    /// The last saved game, or `None` when there is none or the store failed.
    pub async fn load_last_game_state(&self) -> Option<GameState> {
        match self.store.load().await {
            Ok(Some(state)) => {
                tracing::info!(timestamp = %state.timestamp, "Loaded saved game state");
                Some(state)
            }
            Ok(None) => None,
            Err(error) => {
                tracing::error!(%error, "Failed to load saved game state");
                None
            }
        }
    }

    pub async fn clear_saves(&self) -> Result<(), StoreError> {
        self.store.clear().await?;
        tracing::info!("All saved states cleared");
        Ok(())
    }
}
