//! JSON-document adapters: one file per concern.
//!
//! The save slot is a pretty-printed JSON document so players can inspect
//! (and, inevitably, edit) their saves. Scene and settings documents are
//! read-only inputs.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::ports::{SaveStore, SceneSource, SettingsSource, StoreError};
use delvr_shared::{GameSettings, GameState, SceneData};

/// Save slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSaveStore {
    path: PathBuf,
}

impl JsonFileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SaveStore for JsonFileSaveStore {
    async fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let document = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, document).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<GameState>, StoreError> {
        let document = match tokio::fs::read(&self.path).await {
            Ok(document) => document,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_slice(&document)?))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Scene content read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSceneSource {
    path: PathBuf,
}

impl JsonFileSceneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SceneSource for JsonFileSceneSource {
    async fn load(&self) -> Result<Vec<SceneData>, StoreError> {
        let document = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&document)?)
    }
}

/// Settings read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsSource {
    path: PathBuf,
}

impl JsonFileSettingsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsSource for JsonFileSettingsSource {
    async fn load(&self) -> Result<GameSettings, StoreError> {
        let document = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delvr_shared::{BackpackData, HeroData, SceneContextStateData};

    fn sample_state() -> GameState {
        GameState {
            scene_context_state: SceneContextStateData {
                scene: SceneData {
                    id: 1,
                    description: "You enter a dark cave.".into(),
                    characters: vec![],
                    items: vec![],
                    background_image: "scene-1-bg.webp".into(),
                },
                hero: HeroData {
                    name: "Hero".into(),
                    health: 100,
                    backpack: BackpackData {
                        items: vec![],
                        active_attack_item: None,
                        active_defense_item: None,
                    },
                },
            },
            timestamp: chrono::DateTime::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn save_store_round_trips_through_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileSaveStore::new(dir.path().join("saved-game.json"));

        assert!(store.load().await.expect("load").is_none());

        let state = sample_state();
        store.save(&state).await.expect("save");
        let loaded = store.load().await.expect("load").expect("some");
        assert_eq!(loaded, state);

        store.clear().await.expect("clear");
        assert!(store.load().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn clear_tolerates_a_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileSaveStore::new(dir.path().join("saved-game.json"));

        store.clear().await.expect("clear");
    }

    #[tokio::test]
    async fn corrupt_save_document_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saved-game.json");
        tokio::fs::write(&path, b"not json").await.expect("write");

        let result = JsonFileSaveStore::new(path).load().await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn scene_source_reads_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scenes.json");
        tokio::fs::write(
            &path,
            br#"[{"id": 7, "description": "A quiet shrine.", "backgroundImage": "shrine.webp"}]"#,
        )
        .await
        .expect("write");

        let scenes = JsonFileSceneSource::new(path).load().await.expect("load");
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].id, 7);
    }

    #[tokio::test]
    async fn settings_source_surfaces_read_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = JsonFileSettingsSource::new(dir.path().join("missing.json"))
            .load()
            .await;

        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
