//! In-process save slot.
//!
//! The keyed-storage analog for embedded hosts and tests: the document is
//! kept serialized so load/save round-trips exercise the same wire format as
//! the file adapter.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{SaveStore, StoreError};
use delvr_shared::GameState;

/// Save slot held in memory.
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    slot: Mutex<Option<String>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaveStore for MemorySaveStore {
    async fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let document = serde_json::to_string(state)?;
        *self.slot.lock().expect("save slot lock") = Some(document);
        Ok(())
    }

    async fn load(&self) -> Result<Option<GameState>, StoreError> {
        let document = self.slot.lock().expect("save slot lock").clone();
        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("save slot lock") = None;
        Ok(())
    }
}
